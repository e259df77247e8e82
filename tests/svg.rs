//! Rewriting and viewing `<path>` elements of whole documents.

use svgpdtools::{
    NormalizeOptions, SvgNormalizeOptions, collect_paths, format_path_view, normalize_svg,
};

const ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 80 80">
  <g id="A1">
    <path class="shape" transform="translate(40,40) rotate(60) translate(-40,-40)"
          d="m 10,20 10,-10 v 60"/>
    <svg:path xmlns:svg="http://www.w3.org/2000/svg" d="M 45,30 Q 35,30 35,40 q 0,10 10,10 z"/>
    <text>path data: M 0,0</text>
  </g>
</svg>
"#;

#[test]
fn test_normalize_document() {
    let out = normalize_svg(ICON, &SvgNormalizeOptions::default()).unwrap();
    assert!(out.contains(r#"d="M 10,20 L 20,10 V 70""#), "{out}");
    assert!(out.contains(r#"transform="translate(40,40) rotate(60) translate(-40,-40)""#));
    assert!(out.contains(r#"<svg:path xmlns:svg="http://www.w3.org/2000/svg" d="M 45,30 Q 35,30 35,40 35,50 45,50 Z"/>"#));
    assert!(out.contains("<text>path data: M 0,0</text>"));
}

#[test]
fn test_collapse_transform_in_document() {
    let options = SvgNormalizeOptions {
        normalize: NormalizeOptions {
            repr_relative: true,
            ..Default::default()
        },
        collapse_transform_attribute: true,
        precision: 6,
    };
    let out = normalize_svg(ICON, &options).unwrap();
    assert!(!out.contains("transform="), "{out}");
    assert!(
        out.contains(r#"d="m 42.320508,4.019238 l 13.660254,3.660254 -51.961524,30""#),
        "{out}"
    );
}

#[test]
fn test_view_document() {
    let views = collect_paths(ICON).unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].line, Some(3));
    assert_eq!(views[1].line, Some(5));

    assert_eq!(
        format_path_view(&views[0], 80, 6).unwrap(),
        r#"@ 3
<path
    class="shape"
    transform="translate(40, 40)
               rotate(60)
               translate(-40, -40)"
    d="m 10,20    10,-10
       v 60"/>"#
    );
}

#[test]
fn test_malformed_document() {
    assert!(normalize_svg("<svg><path d=\"M 0,0\"></svg>", &SvgNormalizeOptions::default()).is_err());
    assert!(collect_paths("<svg><path d=\"M 0,0 X\"/></svg>").is_ok());
}
