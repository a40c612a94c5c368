use crate::options::{BranchColors, DEFAULT_PALETTE, DepthColors};
use crate::*;
use serde_json::json;

fn sample_tree() -> MindmapNode {
    MindmapNode::branch(
        "root",
        vec![
            MindmapNode::branch(
                "a",
                vec![MindmapNode::leaf("a1"), MindmapNode::leaf("a2")],
            ),
            MindmapNode::branch("b", vec![MindmapNode::leaf("b1")]),
        ],
    )
}

fn node<'a>(root: &'a MindmapNode, path: &str) -> &'a MindmapNode {
    root.walk().find(|n| n.path == path).unwrap()
}

#[test]
fn derive_passes_numbers_through() {
    let settings = GlobalSettings::default().to_settings().unwrap();
    let options = MarkmapOptions::derive(&settings, &sample_tree());

    assert!(!options.auto_fit);
    assert!(options.embed_global_css);
    assert_eq!(options.fit_ratio, 1.0);
    assert_eq!(options.duration, Some(500.0));
    assert_eq!(options.spacing_horizontal, Some(80.0));
    assert_eq!(options.spacing_vertical, Some(5.0));
    assert_eq!(options.padding_x, Some(8.0));
    assert_eq!(options.node_min_height, Some(16.0));
    assert_eq!(options.max_width, Some(0.0));
    assert_eq!(options.initial_expand_level, Some(-1.0));
    assert!(matches!(options.color, Some(ColorScheme::Depth(_))));
}

#[test]
fn derive_skips_malformed_numbers() {
    let settings = Settings::new().with(SettingKey::MaxWidth, "wide");
    let options = MarkmapOptions::derive(&settings, &sample_tree());
    assert_eq!(options.max_width, None);
    assert_eq!(options.color, None);
}

#[test]
fn depth_coloring_uses_level_colors_then_default() {
    let settings = Settings::new()
        .with(SettingKey::Coloring, "depth")
        .with(SettingKey::Depth1Color, "#111")
        .with(SettingKey::Depth2Color, "#222")
        .with(SettingKey::Depth3Color, "#333")
        .with(SettingKey::DefaultColor, "#999");
    let root = MindmapNode::branch(
        "0",
        vec![MindmapNode::branch(
            "1",
            vec![MindmapNode::branch("2", vec![MindmapNode::leaf("3")])],
        )],
    );
    let scheme = ColorScheme::select(&settings, &root).unwrap();

    let colors: Vec<_> = root.walk().map(|n| scheme.color_for(n)).collect();
    assert_eq!(
        colors,
        vec![Some("#111"), Some("#222"), Some("#333"), Some("#999")]
    );
}

#[test]
fn depth_coloring_cycles_an_explicit_color_list() {
    let colors = DepthColors {
        palette: vec!["red".into(), "blue".into()],
        levels: [Some("#111".into()), None, None],
        fallback: None,
    };
    assert_eq!(colors.color_for(0), Some("red"));
    assert_eq!(colors.color_for(1), Some("blue"));
    assert_eq!(colors.color_for(4), Some("red"));
}

#[test]
fn single_coloring_uses_the_default_color() {
    let settings = Settings::new()
        .with(SettingKey::Coloring, "single")
        .with(SettingKey::DefaultColor, "#abc");
    let root = sample_tree();
    let scheme = ColorScheme::select(&settings, &root).unwrap();
    assert!(root.walk().all(|n| scheme.color_for(n) == Some("#abc")));
}

#[test]
fn unknown_coloring_leaves_color_unset() {
    let settings = Settings::new().with(SettingKey::Coloring, "rainbow");
    assert_eq!(ColorScheme::select(&settings, &sample_tree()), None);
}

#[test]
fn branch_coloring_assigns_palette_slots_in_pre_order() {
    let root = sample_tree();
    let colors = BranchColors::for_tree(Vec::new(), None, &root);

    assert_eq!(colors.palette.len(), DEFAULT_PALETTE.len());
    let order: Vec<_> = colors.assignments.keys().cloned().collect();
    assert_eq!(order, vec!["0", "0.0", "0.0.0", "0.0.1", "0.1", "0.1.0"]);
    assert_eq!(colors.color_for(node(&root, "0.1")), Some(DEFAULT_PALETTE[4]));
}

#[test]
fn branch_coloring_freezes_below_the_freeze_level() {
    let settings = Settings::new()
        .with(SettingKey::Coloring, "branch")
        .with(SettingKey::ColorFreezeLevel, 2)
        .with(SettingKey::Color, json!(["#a", "#b", "#c"]));
    let root = sample_tree();
    let Some(ColorScheme::Branch(colors)) = ColorScheme::select(&settings, &root) else {
        panic!("expected branch coloring");
    };

    assert_eq!(colors.freeze_level, Some(2));
    assert_eq!(colors.color_for(node(&root, "0")), Some("#a"));
    assert_eq!(colors.color_for(node(&root, "0.0")), Some("#b"));
    assert_eq!(colors.color_for(node(&root, "0.0.1")), Some("#b"));
    assert_eq!(colors.color_for(node(&root, "0.1")), Some("#c"));
    assert_eq!(colors.color_for(node(&root, "0.1.0")), Some("#c"));
}

#[test]
fn branch_coloring_with_one_color_is_solid() {
    let root = sample_tree();
    let colors = BranchColors::for_tree(vec!["#solid".into()], None, &root);
    assert!(root.walk().all(|n| colors.color_for(n) == Some("#solid")));
}

#[test]
fn color_may_be_a_single_string() {
    let settings = Settings::new()
        .with(SettingKey::Coloring, "depth")
        .with(SettingKey::Color, "#only");
    let root = sample_tree();
    let scheme = ColorScheme::select(&settings, &root).unwrap();
    assert!(root.walk().all(|n| scheme.color_for(n) == Some("#only")));
}

#[test]
fn render_options_overlay_the_delta() {
    let settings = Settings::new().with(SettingKey::AnimationDuration, 500);
    let options = RenderOptions::new(
        MarkmapOptions::derive(&settings, &sample_tree()),
        Settings::new().with(SettingKey::AnimationDuration, 100),
    );
    assert_eq!(options.options.duration, Some(100.0));
    assert_eq!(
        options.delta.get_f64(SettingKey::AnimationDuration),
        Some(100.0)
    );
}

#[test]
fn options_serialize_in_camel_case() {
    let settings = Settings::new()
        .with(SettingKey::Coloring, "single")
        .with(SettingKey::DefaultColor, "#abc")
        .with(SettingKey::PaddingX, 4);
    let value = serde_json::to_value(MarkmapOptions::derive(&settings, &sample_tree())).unwrap();
    assert_eq!(
        value,
        json!({
            "autoFit": false,
            "color": { "kind": "single", "color": "#abc" },
            "embedGlobalCss": true,
            "fitRatio": 1.0,
            "paddingX": 4.0
        })
    );
}
