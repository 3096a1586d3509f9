#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    use keybox_legend::context::{HandleBox, KeyBoxGeometry, LegendContext};
    use keybox_legend::handler::collection::HandlerSizedCollection;
    use keybox_legend::handler::line::HandlerLine;
    use keybox_legend::handler::text::{HandlerAnnotation, HandlerText};
    use keybox_legend::handler::tuple::HandlerTuple;
    use keybox_legend::handler::LegendHandler;
    use keybox_scene::handle::{
        AnnotationHandle, ArrowHandle, CircleCollectionHandle, ErrorbarHandle, Handle,
        LineCollectionHandle, LineHandle, PathCollectionHandle, PolyCollectionHandle,
        StemHandle, TextHandle,
    };
    use keybox_scene::primitive::{CollectionFamily, KeyPrimitive};
    use keybox_scene::transform::KeyTransform;
    use keybox_scene::types::{MarkerShape, Paint};
    use keybox_scene::value::ScalarOrArray;

    const FONTSIZE: f32 = 10.0;

    fn area() -> KeyBoxGeometry {
        KeyBoxGeometry::new(0.0, 0.0, 40.0, 10.0)
    }

    fn render(ctx: &LegendContext, handle: &Handle) -> Vec<KeyPrimitive> {
        let mut handlebox = HandleBox::new(area(), KeyTransform::identity());
        ctx.legend_key(handle, FONTSIZE, &mut handlebox).unwrap();
        handlebox.into_primitives()
    }

    fn line_handle_with_marker() -> Handle {
        let mut handle = LineHandle::default();
        handle.style.marker = Some(MarkerShape::Circle);
        Handle::Line(handle)
    }

    #[test]
    fn test_line_single_point_spans_box() {
        let ctx = LegendContext::default();
        let prims = render(&ctx, &line_handle_with_marker());
        assert_eq!(prims.len(), 2);

        // The stroke spans the full box; the lone marker sits at its middle.
        let KeyPrimitive::Polyline(stroke) = &prims[0] else {
            panic!("expected polyline, got {:?}", prims[0]);
        };
        assert_eq!(stroke.x, vec![0.0, 40.0]);
        assert_eq!(stroke.y, vec![5.0, 5.0]);

        let KeyPrimitive::MarkerSet(markers) = &prims[1] else {
            panic!("expected marker set, got {:?}", prims[1]);
        };
        assert_eq!(markers.x, vec![20.0]);
        assert_eq!(markers.y, vec![5.0]);
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    fn test_line_multi_point_endpoints(#[case] numpoints: usize) {
        let ctx = LegendContext {
            numpoints,
            ..Default::default()
        };
        let prims = render(&ctx, &line_handle_with_marker());

        let KeyPrimitive::Polyline(stroke) = &prims[0] else {
            panic!("expected polyline, got {:?}", prims[0]);
        };
        // Each end is inset by marker_pad * fontsize.
        assert_eq!(stroke.x.len(), numpoints);
        assert_approx_eq!(f32, stroke.x[0], 3.0);
        assert_approx_eq!(f32, stroke.x[numpoints - 1], 37.0);

        let KeyPrimitive::MarkerSet(markers) = &prims[1] else {
            panic!("expected marker set, got {:?}", prims[1]);
        };
        assert_eq!(markers.x, stroke.x);
    }

    #[test]
    fn test_line_stroke_and_markers_split() {
        let ctx = LegendContext {
            markerscale: 2.0,
            ..Default::default()
        };
        let prims = render(&ctx, &line_handle_with_marker());

        let KeyPrimitive::Polyline(stroke) = &prims[0] else {
            panic!("expected polyline");
        };
        // The stroke never carries the marker; it lives on its own primitive.
        assert!(stroke.style.marker.is_none());

        let KeyPrimitive::MarkerSet(markers) = &prims[1] else {
            panic!("expected marker set");
        };
        assert_eq!(markers.style.marker, Some(MarkerShape::Circle));
        assert_approx_eq!(f32, markers.style.marker_size, 12.0);
    }

    #[test]
    fn test_handler_padding_shrinks_area() {
        let ctx = LegendContext::default();
        let handler = HandlerLine {
            opts: keybox_legend::handler::HandlerOpts {
                xpad: 0.2,
                ypad: 0.0,
                update_fn: None,
            },
            ..Default::default()
        };
        let mut handlebox = HandleBox::new(area(), KeyTransform::identity());
        handler
            .legend_key(&ctx, &line_handle_with_marker(), FONTSIZE, &mut handlebox)
            .unwrap();

        let KeyPrimitive::Polyline(stroke) = &handlebox.primitives()[0] else {
            panic!("expected polyline");
        };
        // xdescent and width both shrink by xpad * fontsize = 2.
        assert_approx_eq!(f32, stroke.x[0], 2.0);
        assert_approx_eq!(f32, stroke.x[1], 40.0);
    }

    #[test]
    fn test_patch_rect_spans_box() {
        let ctx = LegendContext::default();
        let prims = render(&ctx, &Handle::Patch(Default::default()));
        assert_eq!(prims.len(), 1);
        let KeyPrimitive::Rect(rect) = &prims[0] else {
            panic!("expected rect, got {:?}", prims[0]);
        };
        assert_eq!((rect.x, rect.y), (0.0, 0.0));
        assert_eq!((rect.width, rect.height), (40.0, 10.0));
    }

    #[test]
    fn test_poly_collection_degrades_to_first() {
        let ctx = LegendContext::default();
        let mut handle = PolyCollectionHandle::default();
        handle.style.face = ScalarOrArray::new_array(vec![
            Paint::Color([0.0, 1.0, 0.0, 1.0]),
            Paint::Color([0.0, 0.0, 1.0, 1.0]),
        ]);
        handle.style.edge = ScalarOrArray::new_array(vec![]);
        let prims = render(&ctx, &Handle::PolyCollection(handle));

        let KeyPrimitive::Rect(rect) = &prims[0] else {
            panic!("expected rect");
        };
        assert_eq!(rect.style.fill, Paint::Color([0.0, 1.0, 0.0, 1.0]));
        // An empty edge array means no edge, not a default edge.
        assert_eq!(rect.style.edge, Paint::None);
    }

    #[test]
    fn test_line_collection_degrades_to_first() {
        let ctx = LegendContext {
            scatterpoints: 3,
            ..Default::default()
        };
        let handle = Handle::LineCollection(LineCollectionHandle {
            colors: ScalarOrArray::new_array(vec![
                Paint::Color([0.0, 0.0, 1.0, 1.0]),
                Paint::Color([1.0, 0.0, 0.0, 1.0]),
            ]),
            stroke_widths: ScalarOrArray::new_array(vec![3.0, 1.0]),
            stroke_dashes: ScalarOrArray::new_array(vec![Some(vec![2.0, 1.0]), None]),
        });
        let prims = render(&ctx, &handle);

        // One stroke, sampled at the scatter count, styled from the first
        // element of each property array.
        assert_eq!(prims.len(), 1);
        let KeyPrimitive::Polyline(stroke) = &prims[0] else {
            panic!("expected polyline, got {:?}", prims[0]);
        };
        assert_eq!(stroke.x.len(), 3);
        assert_approx_eq!(f32, stroke.x[0], 3.0);
        assert_approx_eq!(f32, stroke.x[2], 37.0);
        assert_eq!(stroke.style.stroke, Paint::Color([0.0, 0.0, 1.0, 1.0]));
        assert_approx_eq!(f32, stroke.style.stroke_width, 3.0);
        assert_eq!(stroke.style.stroke_dash, Some(vec![2.0, 1.0]));
        assert!(stroke.style.marker.is_none());
    }

    #[test]
    fn test_line_collection_empty_colors() {
        let ctx = LegendContext::default();
        let handle = Handle::LineCollection(LineCollectionHandle {
            colors: ScalarOrArray::new_array(vec![]),
            ..Default::default()
        });
        let prims = render(&ctx, &handle);
        let KeyPrimitive::Polyline(stroke) = &prims[0] else {
            panic!("expected polyline");
        };
        // An empty color array means no stroke, not a default stroke.
        assert_eq!(stroke.style.stroke, Paint::None);
    }

    #[test]
    fn test_empty_path_collection_falls_back_to_circle() {
        let ctx = LegendContext::default();
        let handle = Handle::PathCollection(PathCollectionHandle {
            paths: vec![],
            sizes: vec![9.0],
            style: Default::default(),
        });
        let prims = render(&ctx, &handle);
        let KeyPrimitive::Collection(coll) = &prims[0] else {
            panic!("expected collection, got {:?}", prims[0]);
        };
        assert_eq!(coll.family, CollectionFamily::Circle);
    }

    #[test]
    fn test_sized_collection_few_points_size_subset() {
        let ctx = LegendContext {
            scatterpoints: 1,
            ..Default::default()
        };
        let handle = Handle::CircleCollection(CircleCollectionHandle {
            sizes: vec![4.0, 16.0],
            style: Default::default(),
        });
        let prims = render(&ctx, &handle);
        assert_eq!(prims.len(), 1);
        let KeyPrimitive::Collection(coll) = &prims[0] else {
            panic!("expected collection, got {:?}", prims[0]);
        };
        // One representative point shows the midpoint size.
        assert_eq!(coll.sizes, vec![10.0]);
        assert_eq!(coll.offsets.len(), 1);
        assert_approx_eq!(f32, coll.offsets[0][0], 20.0);
        assert_approx_eq!(f32, coll.offsets[0][1], 3.75);
    }

    #[test]
    fn test_sized_collection_size_span() {
        let ctx = LegendContext {
            scatterpoints: 5,
            markerscale: 2.0,
            ..Default::default()
        };
        let handle = Handle::CircleCollection(CircleCollectionHandle {
            sizes: vec![4.0, 16.0],
            style: Default::default(),
        });
        let prims = render(&ctx, &handle);
        let KeyPrimitive::Collection(coll) = &prims[0] else {
            panic!("expected collection");
        };
        // Sizes are area-like: markerscale applies squared. The interpolated
        // run is min..=max.
        assert_eq!(coll.sizes.len(), 5);
        assert_approx_eq!(f32, coll.sizes[0], 16.0);
        assert_approx_eq!(f32, coll.sizes[4], 64.0);
        assert!(coll.sizes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_collection_gets_offset_transform() {
        let ctx = LegendContext::default();
        let handle = Handle::CircleCollection(Default::default());
        let trans = KeyTransform::translation(120.0, 60.0);
        let mut handlebox = HandleBox::new(area(), trans);
        ctx.legend_key(&handle, FONTSIZE, &mut handlebox).unwrap();

        let KeyPrimitive::Collection(coll) = &handlebox.primitives()[0] else {
            panic!("expected collection");
        };
        // The destination transform moves the offsets, not the geometry.
        assert_eq!(coll.offset_transform, trans);
        assert!(coll.transform.is_identity());
    }

    #[test]
    fn test_explicit_yoffsets_override_table() {
        let ctx = LegendContext {
            scatterpoints: 2,
            ..Default::default()
        };
        let handler = HandlerSizedCollection::with_yoffsets(vec![0.2, 0.8]);
        let handle = Handle::CircleCollection(Default::default());
        let prims = handler
            .create_primitives(&ctx, &handle, &area(), FONTSIZE, &KeyTransform::identity())
            .unwrap();
        let KeyPrimitive::Collection(coll) = &prims[0] else {
            panic!("expected collection");
        };
        assert_approx_eq!(f32, coll.offsets[0][1], 2.0);
        assert_approx_eq!(f32, coll.offsets[1][1], 8.0);
    }

    #[test]
    fn test_errorbar_whiskers_only() {
        let ctx = LegendContext::default();
        let handle = Handle::Errorbar(ErrorbarHandle {
            plot_line: None,
            cap_lines: vec![],
            bar_line_cols: vec![],
            has_xerr: true,
            has_yerr: false,
        });
        let prims = render(&ctx, &handle);

        // One whisker collection, then the invisible line/marker pair.
        assert_eq!(prims.len(), 3);
        let KeyPrimitive::LineSet(whiskers) = &prims[0] else {
            panic!("expected line set, got {:?}", prims[0]);
        };
        assert_eq!(whiskers.segments, vec![[[15.0, 5.0], [25.0, 5.0]]]);

        assert!(matches!(&prims[1], KeyPrimitive::Polyline(_)));
        assert!(matches!(&prims[2], KeyPrimitive::MarkerSet(_)));
        assert!(!prims[1].is_visible());
        assert!(!prims[2].is_visible());
        // The invisible pair is unclipped like everything else produced.
        assert!(prims.iter().all(|p| !p.is_clipped()));
    }

    #[test]
    fn test_errorbar_caps_and_both_axes() {
        let ctx = LegendContext::default();
        let handle = Handle::Errorbar(ErrorbarHandle {
            plot_line: Some(LineHandle::default()),
            cap_lines: vec![LineHandle::default()],
            bar_line_cols: vec![],
            has_xerr: true,
            has_yerr: true,
        });
        let prims = render(&ctx, &handle);

        // 2 whisker collections, 4 cap marker sets, line, marker.
        assert_eq!(prims.len(), 8);
        let KeyPrimitive::LineSet(ybars) = &prims[1] else {
            panic!("expected line set, got {:?}", prims[1]);
        };
        assert_eq!(ybars.segments, vec![[[20.0, 0.0], [20.0, 10.0]]]);

        let KeyPrimitive::MarkerSet(xcap) = &prims[2] else {
            panic!("expected marker set, got {:?}", prims[2]);
        };
        assert_eq!(xcap.style.marker, Some(MarkerShape::TickVertical));
        assert_eq!(xcap.x, vec![15.0]);

        let KeyPrimitive::MarkerSet(ycap) = &prims[4] else {
            panic!("expected marker set, got {:?}", prims[4]);
        };
        assert_eq!(ycap.style.marker, Some(MarkerShape::TickHorizontal));
        assert_eq!(ycap.y, vec![0.0]);

        assert!(prims[6].is_visible());
        assert!(prims[7].is_visible());
    }

    #[test]
    fn test_stem_upper_half() {
        let ctx = LegendContext::default();
        let prims = render(&ctx, &Handle::Stem(StemHandle::default()));

        // Head markers, one stem, the baseline.
        assert_eq!(prims.len(), 3);
        let KeyPrimitive::MarkerSet(heads) = &prims[0] else {
            panic!("expected marker set, got {:?}", prims[0]);
        };
        // Default offset 0.375 compressed into the upper half:
        // 10 * (0.5 * 0.375 + 0.5).
        assert_eq!(heads.x, vec![20.0]);
        assert_approx_eq!(f32, heads.y[0], 6.875);

        let KeyPrimitive::Polyline(stem) = &prims[1] else {
            panic!("expected polyline, got {:?}", prims[1]);
        };
        assert_eq!(stem.x, vec![20.0, 20.0]);
        assert_eq!(stem.y[0], 0.0);
        assert_approx_eq!(f32, stem.y[1], 6.875);

        let KeyPrimitive::Polyline(baseline) = &prims[2] else {
            panic!("expected polyline, got {:?}", prims[2]);
        };
        assert_eq!(baseline.x, vec![0.0, 40.0]);
        assert_eq!(baseline.y, vec![0.0, 0.0]);
    }

    #[test]
    fn test_tuple_equal_split_tiles_with_pad() {
        let ctx = LegendContext::default();
        let handle = Handle::Tuple(vec![
            Handle::Line(LineHandle::default()),
            Handle::Line(LineHandle::default()),
        ]);
        let prims = render(&ctx, &handle);
        assert_eq!(prims.len(), 4);

        // pad = borderpad * fontsize = 4; two 18-wide regions.
        let KeyPrimitive::Polyline(first) = &prims[0] else {
            panic!("expected polyline");
        };
        assert_eq!(first.x, vec![0.0, 18.0]);
        let KeyPrimitive::Polyline(second) = &prims[2] else {
            panic!("expected polyline");
        };
        assert_eq!(second.x, vec![22.0, 40.0]);
    }

    #[test]
    fn test_tuple_unequal_ratios_pinned() {
        // Under non-uniform ratios the offset formula indexes the width list
        // from its far end, so regions need not tile left to right. This test
        // pins that layout.
        let ctx = LegendContext::default();
        let handler = HandlerTuple::new(Some(3), None, Some(vec![2.0, 1.0, 1.0]), None);
        let handle = Handle::Tuple(vec![
            Handle::Line(LineHandle::default()),
            Handle::Line(LineHandle::default()),
            Handle::Line(LineHandle::default()),
        ]);
        let prims = handler
            .create_primitives(&ctx, &handle, &area(), FONTSIZE, &KeyTransform::identity())
            .unwrap();
        assert_eq!(prims.len(), 6);

        let starts: Vec<f32> = [0, 2, 4]
            .iter()
            .map(|&i| match &prims[i] {
                KeyPrimitive::Polyline(line) => line.x[0],
                other => panic!("expected polyline, got {other:?}"),
            })
            .collect();
        // widths = [16, 8, 8]; region 1 starts inside region 0 and region 2
        // starts past the box.
        assert_approx_eq!(f32, starts[0], 0.0);
        assert_approx_eq!(f32, starts[1], 12.0);
        assert_approx_eq!(f32, starts[2], 40.0);
    }

    #[test]
    fn test_tuple_explicit_handler_missing() {
        let ctx = LegendContext::default();
        let handler = HandlerTuple::new(
            None,
            None,
            None,
            Some(vec![std::sync::Arc::new(HandlerLine::default())]),
        );
        let handle = Handle::Tuple(vec![
            Handle::Line(LineHandle::default()),
            Handle::Line(LineHandle::default()),
        ]);
        let result =
            handler.create_primitives(&ctx, &handle, &area(), FONTSIZE, &KeyTransform::identity());
        assert!(matches!(
            result,
            Err(keybox_legend::error::KeyboxLegendError::MissingChildHandler(1))
        ));
    }

    #[rstest]
    #[case("series-alpha", "Aa")]
    #[case("Aa", "Aa")]
    #[case("μ", "μ")]
    fn test_text_abbreviation(#[case] source: &str, #[case] shown: &str) {
        let ctx = LegendContext::default();
        let handle = Handle::Text(TextHandle {
            text: source.to_string(),
            style: Default::default(),
        });
        let prims = render(&ctx, &handle);
        assert_eq!(prims.len(), 1);
        let KeyPrimitive::Text(text) = &prims[0] else {
            panic!("expected text, got {:?}", prims[0]);
        };
        assert_eq!(text.text, shown);
        // Text keys render at two-thirds of the legend fontsize.
        assert_approx_eq!(f32, text.style.font_size, 2.0 * FONTSIZE / 3.0);
    }

    #[test]
    fn test_text_position() {
        let ctx = LegendContext::default();
        let handler = HandlerText::default();
        let handle = Handle::Text(TextHandle {
            text: "Aa".to_string(),
            style: Default::default(),
        });
        let prims = handler
            .create_primitives(&ctx, &handle, &area(), 12.0, &KeyTransform::identity())
            .unwrap();
        let KeyPrimitive::Text(text) = &prims[0] else {
            panic!("expected text");
        };
        // Centered horizontally, shifted left by a quarter of the rendered
        // string's nominal width; a quarter of the box up from the bottom.
        assert_approx_eq!(f32, text.x, 20.0 - 2.0 * 8.0 / 4.0);
        assert_approx_eq!(f32, text.y, 2.5);
    }

    #[test]
    fn test_annotation_text_and_arrow() {
        let ctx = LegendContext::default();
        let handle = Handle::Annotation(AnnotationHandle {
            text: "note".to_string(),
            style: Default::default(),
            arrow: Some(ArrowHandle::default()),
        });
        let prims = render(&ctx, &handle);
        assert_eq!(prims.len(), 2);
        assert!(matches!(&prims[0], KeyPrimitive::Text(_)));

        let KeyPrimitive::Arrow(arrow) = &prims[1] else {
            panic!("expected arrow, got {:?}", prims[1]);
        };
        // 1:4 width split of the 36 units left after padding.
        assert_approx_eq!(f32, arrow.start[0], 11.2);
        assert_approx_eq!(f32, arrow.end[0], 40.0);
        assert_approx_eq!(f32, arrow.mutation_scale, 28.8 / 3.0);
    }

    #[test]
    fn test_annotation_arrow_only() {
        let ctx = LegendContext::default();
        let handle = Handle::Annotation(AnnotationHandle {
            text: String::new(),
            style: Default::default(),
            arrow: Some(ArrowHandle::default()),
        });
        let prims = render(&ctx, &handle);
        assert_eq!(prims.len(), 1);
        let KeyPrimitive::Arrow(arrow) = &prims[0] else {
            panic!("expected arrow, got {:?}", prims[0]);
        };
        // The arrow gets the whole box when there is no text beside it.
        assert_approx_eq!(f32, arrow.start[0], 0.0);
        assert_approx_eq!(f32, arrow.end[0], 40.0);
        assert_approx_eq!(f32, arrow.mutation_scale, 40.0 / 3.0);
    }

    #[test]
    fn test_annotation_text_only() {
        let ctx = LegendContext::default();
        let handle = Handle::Annotation(AnnotationHandle {
            text: "note".to_string(),
            style: Default::default(),
            arrow: None,
        });
        let prims = render(&ctx, &handle);
        assert_eq!(prims.len(), 1);
        assert!(matches!(&prims[0], KeyPrimitive::Text(_)));
    }

    #[test]
    fn test_annotation_placeholder() {
        let ctx = LegendContext::default();
        let handle = Handle::Annotation(AnnotationHandle {
            text: String::new(),
            style: Default::default(),
            arrow: None,
        });
        let prims = render(&ctx, &handle);
        assert_eq!(prims.len(), 1);
        let KeyPrimitive::Rect(rect) = &prims[0] else {
            panic!("expected rect, got {:?}", prims[0]);
        };
        // A zero-size fully transparent stand-in keeps the entry's slot.
        assert_eq!((rect.width, rect.height), (0.0, 0.0));
        assert_eq!(rect.style.alpha, Some(0.0));
    }

    #[test]
    fn test_annotation_pad_override() {
        let ctx = LegendContext::default();
        let handler = HandlerAnnotation {
            pad: Some(0.0),
            ..Default::default()
        };
        let handle = Handle::Annotation(AnnotationHandle {
            text: "note".to_string(),
            style: Default::default(),
            arrow: Some(ArrowHandle::default()),
        });
        let prims = handler
            .create_primitives(&ctx, &handle, &area(), FONTSIZE, &KeyTransform::identity())
            .unwrap();
        let KeyPrimitive::Arrow(arrow) = &prims[1] else {
            panic!("expected arrow");
        };
        // Without padding the full 40 units split 1:4.
        assert_approx_eq!(f32, arrow.start[0], 8.0);
        assert_approx_eq!(f32, arrow.end[0], 40.0);
    }
}
