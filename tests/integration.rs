use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

fn make_study_dir(name: &str, mode: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_contents = String::new()
        + "[recording]\n"
        + "freq = 10\n"
        + "skip_rows = 1\n"
        + "\n"
        + "[noise]\n"
        + &format!("mode = \"{mode}\"\n")
        + "start = 0\n"
        + "end = 40\n"
        + "\n"
        + "[analysis]\n"
        + "start = 40\n"
        + "relative = false\n"
        + "epoch_secs = 3\n";
    fs::write(test_dir.join("config.toml"), config_contents).expect("failed to write config file");

    for (name, amp) in [("rest", 0.0), ("walk", 0.4)] {
        let mut contents = String::from("x,y,z\n");
        for i in 0..40 {
            let jitter = if i % 2 == 0 { 0.01 } else { -0.01 };
            contents += &format!("{jitter},{},{}\n", -jitter, 1.0 + jitter);
        }
        for i in 0..75 {
            let val = amp * ((i % 5) as f64 - 2.0) + if i % 2 == 0 { 0.01 } else { -0.01 };
            contents += &format!("{val},{},{}\n", 0.5 * val, 1.0 - val);
        }
        fs::write(test_dir.join(format!("{name}.csv")), contents)
            .expect("failed to write recording file");
    }

    test_dir
}

fn run_bin(args: &[&str]) -> bool {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_actindex"));

    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command");

    if !output.status.success() {
        eprintln!(
            "binary failed with {args:?}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    output.status.success()
}

fn read_report(test_dir: &Path, name: &str) -> serde_json::Value {
    let contents = fs::read_to_string(test_dir.join("results").join(format!("{name}.json")))
        .expect("failed to read report");
    serde_json::from_str(&contents).expect("failed to parse report")
}

#[test]
fn basic_workflow() {
    let test_dir = make_study_dir("basic_workflow", "bai");
    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    assert!(run_bin(&["--study-dir", test_dir_str, "analyze"]));

    let rest = read_report(&test_dir, "rest");
    let walk = read_report(&test_dir, "walk");
    for report in [&rest, &walk] {
        assert_eq!(report["mode"], "bai");
        assert_eq!(report["freq"], 10);
        assert_eq!(report["score"]["windows"], 7);
        assert_eq!(report["series"].as_array().map(Vec::len), Some(7));
        assert_eq!(report["epochs"].as_array().map(Vec::len), Some(3));
    }

    let rest_total = rest["score"]["total"].as_f64().expect("missing total");
    let walk_total = walk["score"]["total"].as_f64().expect("missing total");
    assert_eq!(rest_total, 0.0);
    assert!(walk_total > 0.0);

    assert!(run_bin(&["--study-dir", test_dir_str, "clean"]));
    assert!(!test_dir.join("results").exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn unknown_mode_fails() {
    let test_dir = make_study_dir("unknown_mode_fails", "mean");
    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    assert!(!run_bin(&["--study-dir", test_dir_str, "analyze"]));
    assert!(!test_dir.join("results").exists());

    fs::remove_dir_all(&test_dir).ok();
}
