//! Parsing path data and transform lists through the public API.

use svgpdtools::{
    CommandData, PathData, Point, SvgpdError, Transform, format_number, parse_path,
    parse_transform, parse_transform_list, pathdata_from_str, precision, set_precision,
    transform_from_str,
};

#[test]
fn test_round_trip() {
    for src in [
        "m 10,20 10,-10 v 60 m -10,0 l 20,0 m 20,-60 c -10,0 -20,10 -20,30 0,20 10,30 20,30 C 60,70 70,60 70,40 c 0,-20 -10,-30 -20,-30 z m 0,10 v 40",
        "m 0,0 c 100,-300 300,-300 400,0 s 300,300 400,0 q 200,-600 -400,0 t -400,0 400,0 400,0 q 100,-300 -400,0 t -400,0",
        "m 30,45 a 20 20 0 1 1 20,0 z m 20,0 a 25 15 25 1 1 -20,0 24 12 345 1 0 20,0 m 5,-20 -30,0 m 15,0 0,15",
        "M 0.5,-1.25 L 0.000001,3",
    ] {
        assert_eq!(parse_path(src).unwrap().render(6), src);
    }
}

#[test]
fn test_basic() {
    assert_eq!(parse_path("m 0,0").unwrap().render(0), "m 0,0");
    assert_eq!(parse_path("m1 0").unwrap().render(0), "m 1,0");
    assert_eq!(parse_path("M 2.0.0").unwrap().render(0), "M 2,0");
    assert_eq!(
        parse_path("m 10 20 10-10-10,0 l 20,0 20 -60 -10 0")
            .unwrap()
            .render(0),
        "m 10,20 10,-10 -10,0 l 20,0 20,-60 -10,0"
    );
    assert_eq!(
        parse_path("m 0,0 h 100 100 50 v 200,50 h-250 v 250")
            .unwrap()
            .render(6),
        "m 0,0 h 100 100 50 v 200 50 h -250 v 250"
    );
}

#[test]
fn test_arc_geometry() {
    let pd = pathdata_from_str(
        "m 30,45 a 20 20 0 11 20,0 z m 20,0 a 25 15 25 11 -20,0 24 12 345 10 20,0 m 5,-20 -30,0 m 15,0 0,15",
    )
    .unwrap();
    assert_eq!(pd.len(), 7);

    let arcs: Vec<_> = [1, 4]
        .iter()
        .flat_map(|&i| match pd.commands()[i].data() {
            CommandData::Arc(items) => items.clone(),
            other => panic!("expected an arc, got {other:?}"),
        })
        .collect();

    let render = |p: Point| p.render(6);
    assert_eq!(
        arcs.iter().map(|a| render(a.from())).collect::<Vec<_>>(),
        ["30,45", "50,45", "30,45"]
    );
    assert_eq!(
        arcs.iter().map(|a| render(a.center())).collect::<Vec<_>>(),
        ["40,27.679492", "47.905081,60.295468", "32.693603,56.699606"]
    );
    assert_eq!(
        arcs.iter().map(|a| render(a.ellipse_start())).collect::<Vec<_>>(),
        ["60,27.679492", "70.562775,70.860925", "55.875823,50.487949"]
    );
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        parse_path("L 0,0").unwrap_err(),
        SvgpdError::MissingMoveto { .. }
    ));
    assert!(matches!(
        parse_path("M 0,0 K 1,1").unwrap_err(),
        SvgpdError::UnknownCommand { command: 'K', .. }
    ));
    assert!(matches!(
        parse_path("M 0,0 a 5 5 0 1").unwrap_err(),
        SvgpdError::MissingArcFlags { .. }
    ));
    assert!(matches!(
        parse_path("M 0,0 L 3 4 5").unwrap_err(),
        SvgpdError::InvalidParameters { .. }
    ));
    assert!(matches!(
        parse_path("M +e1,2").unwrap_err(),
        SvgpdError::InvalidNumber { .. }
    ));
    assert!("M 0,0 Q 1,1".parse::<PathData>().is_err());
}

#[test]
fn test_error_messages_name_the_fragment() {
    let err = parse_path("M 0,0 L 1,2 C 1,2,3").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("C 1,2,3"), "{message}");
}

#[test]
fn test_transform_functions() {
    let p = Point::new(1.0, 1.0);
    let cases = [
        ("translate( 40, 40)", Transform::translate(40.0, 40.0)),
        ("scale(10 )", Transform::scale(10.0, 10.0)),
        ("scale(10, 20)", Transform::scale(10.0, 20.0)),
        ("rotate(30)", Transform::rotate(30.0)),
        ("rotate(30, 40, 40)", Transform::rotate_about(30.0, 40.0, 40.0)),
        ("skewX(20)", Transform::skew_x(20.0)),
        ("skewY(20)", Transform::skew_y(20.0)),
        ("matrix(1,2,3,4,5,6)", Transform::matrix(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)),
    ];
    for (src, expected) in cases {
        let ts = parse_transform_list(src).unwrap();
        assert_eq!(ts.len(), 1, "{src}");
        assert_eq!(p.transformed(&ts[0]), p.transformed(&expected), "{src}");
    }
    assert!(parse_transform_list("").unwrap().is_empty());
}

#[test]
fn test_transform_list() {
    let src = "
        translate(40,40)
        rotate(60)
        translate(-40,-40)
        ";
    let ts = parse_transform_list(src).unwrap();
    let rendered: Vec<String> = ts.iter().map(|t| t.render(6)).collect();
    assert_eq!(
        rendered.join(" "),
        "translate(40, 40) rotate(60) translate(-40, -40)"
    );

    let p = Point::new(100.0, 100.0);
    let moved = p.transformed(&Transform::rotate_about(60.0, 40.0, 40.0));
    let t1 = Transform::concat(&ts);
    let t2 = transform_from_str(src).unwrap();
    let t3 = parse_transform("rotate(60, 40, 40)").unwrap();
    for t in [&t1, &t2, &t3] {
        assert!(p.transformed(t).approx_eq(moved, 1e-9));
    }

    let back = p.transformed(&t1).transformed(&t1.inverse().unwrap());
    assert!(back.approx_eq(p, 1e-9));
}

#[test]
fn test_transform_list_errors() {
    for src in [",translate(1)", "transform(1)", "translate(1,2,3)"] {
        assert!(matches!(
            transform_from_str(src).unwrap_err(),
            SvgpdError::InvalidTransform { .. }
        ));
    }
}

// The only test that changes the process-wide precision.
#[test]
fn test_global_precision() {
    let pd = parse_path("M 1.23456789,2 L 3.14159265,0.5").unwrap();

    set_precision(2);
    assert_eq!(precision(), 2);
    assert_eq!(pd.to_string(), "M 1.23,2 L 3.14,0.5");
    assert_eq!(Point::new(-0.0001, 1.0).to_string(), "0,1");

    set_precision(6);
    assert_eq!(pd.to_string(), "M 1.234568,2 L 3.141593,0.5");

    assert_eq!(format_number(1.2000001, 6), "1.2");
    assert_eq!(format_number(-0.0000001, 6), "0");
    assert_eq!(format_number(3.0, 0), "3");
}
