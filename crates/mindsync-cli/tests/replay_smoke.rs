use assert_cmd::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::process::Command;

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("mindsync-cli");
    let output = Command::new(exe).args(args).assert().success().get_output().clone();
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn replay_script_coalesces_and_fits_once() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = tmp.path().join("script.json");
    let body = json!({
        "root": {
            "content": "Plan",
            "children": [{ "content": "Build" }, { "content": "Ship" }]
        },
        "block": { "spacingHorizontal": 150 },
        "events": [
            { "source": "global", "settings": { "coloring": "single" } },
            { "source": "document", "markdown": "---\nmarkmap:\n  highlight: false\n---\n# Notes\n" },
            { "source": "document", "settings": { "highlight": true } },
            { "source": "document", "settings": { "highlight": true, "animationDuration": 50 } },
            { "source": "document", "settings": { "highlight": true, "animationDuration": 50 } }
        ]
    });
    fs::write(&script, body.to_string()).expect("write script");

    let out = run_json(&["replay", script.to_string_lossy().as_ref()]);

    let steps = out["steps"].as_array().expect("steps");
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0]["decision"], Value::Null, "waits for the document");
    assert_eq!(steps[1]["decision"]["willFullRender"], json!(true));
    assert_eq!(steps[2]["decision"]["willFullRender"], json!(false));
    assert_eq!(steps[2]["decision"]["restyled"], json!(["highlight"]));
    assert_eq!(steps[3]["decision"]["optionsDelta"], json!({ "animationDuration": 50 }));
    assert_eq!(steps[4]["decision"], Value::Null, "identical snapshot is dropped");

    let calls: Vec<&str> = out["calls"]
        .as_array()
        .expect("calls")
        .iter()
        .map(|c| c["call"].as_str().expect("call tag"))
        .collect();
    assert_eq!(calls, vec!["setData", "fit", "setOptions"]);
    assert_eq!(out["calls"][0]["nodes"], json!(3));
    assert_eq!(
        out["calls"][0]["options"]["options"]["spacingHorizontal"],
        json!(150.0)
    );

    assert_eq!(out["container"]["classes"], json!(["mm-highlight"]));
    assert_eq!(out["effective"]["coloring"], json!("single"));
}

#[test]
fn frontmatter_prints_markmap_settings() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = tmp.path().join("doc.md");
    fs::write(
        &doc,
        "---\ntitle: x\nmarkmap:\n  coloring: branch\n  colorFreezeLevel: 2\n---\n# Root\n",
    )
    .expect("write doc");

    let out = run_json(&["frontmatter", doc.to_string_lossy().as_ref()]);
    assert_eq!(out, json!({ "colorFreezeLevel": 2, "coloring": "branch" }));
}

#[test]
fn unknown_setting_fails_with_dedicated_exit_code() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = tmp.path().join("doc.md");
    fs::write(&doc, "---\nmarkmap:\n  zoom: 3\n---\n# Root\n").expect("write doc");

    let exe = assert_cmd::cargo_bin!("mindsync-cli");
    let output = Command::new(exe)
        .args(["frontmatter", doc.to_string_lossy().as_ref()])
        .assert()
        .code(3)
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("`zoom`"), "stderr: {stderr}");
}

#[test]
fn unknown_flag_prints_usage() {
    let exe = assert_cmd::cargo_bin!("mindsync-cli");
    Command::new(exe).arg("--bogus").assert().code(2);
}
