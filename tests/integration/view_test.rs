//! Integration tests for the structure dumper and report files

use std::fs;

use h5ep::config::DumpConfig;
use h5ep::view::{view_file, DumpOptions, Dumper};
use h5ep::{ArrayData, Container, Mode};
use ndarray::{arr0, arr1, Array2};
use tempfile::TempDir;

fn dump_to_string(path: &std::path::Path, options: DumpOptions) -> (String, h5ep::view::DumpStats) {
    let container = Container::open(path, Mode::Read).unwrap();
    let mut out = Vec::new();
    let stats = Dumper::new(options).dump(&container, &mut out, |_| {}).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

// ============================================================================
// Report Format
// ============================================================================

#[test]
fn snapshot_small_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.hdf5");
    let mut container = Container::open(&path, Mode::Create).unwrap();
    container
        .write_array("a", &ArrayData::I32(arr1(&[1, 2, 3]).into_dyn()))
        .unwrap();
    container
        .write_array("g/s", &ArrayData::I64(arr0(5).into_dyn()))
        .unwrap();
    container.close().unwrap();
    {
        let file = hdf5::File::open_rw(&path).unwrap();
        file.group("g").unwrap().create_group("h").unwrap();
    }

    let (text, stats) = dump_to_string(&path, DumpOptions::default());

    insta::assert_snapshot!(text.trim_end(), @r"
    Dataset: a
    Value:
    [1, 2, 3]

    Group: g
    Group: g/h
    Dataset: g/s
    Value:
    5
    ");
    assert_eq!(stats.groups_visited, 3);
    assert_eq!(stats.datasets, 2);
    assert_eq!(stats.pending, 0);
}

#[test]
fn long_dataset_is_truncated_in_the_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("long.hdf5");
    let mut container = Container::open(&path, Mode::Create).unwrap();
    let long = Array2::from_shape_fn((250, 2), |(r, c)| (r * 2 + c) as i64);
    let short = Array2::from_shape_fn((50, 2), |(r, c)| (r * 2 + c) as i64);
    container
        .write_array("long", &ArrayData::I64(long.into_dyn()))
        .unwrap();
    container
        .write_array("short", &ArrayData::I64(short.into_dyn()))
        .unwrap();
    container.close().unwrap();

    let (text, stats) = dump_to_string(&path, DumpOptions::default());

    assert_eq!(stats.truncated, 1);
    assert_eq!(text.matches("... (truncated, total rows: 250)").count(), 1);
    // row 99 is the last one shown, row 100 is cut
    assert!(text.contains("[198, 199]]"));
    assert!(!text.contains("[200, 201]"));
    // the short dataset keeps its last row
    let short_section = text.split("Dataset: short").nth(1).unwrap();
    assert!(short_section.contains("[98, 99]]"));
    assert!(!short_section.contains("truncated"));
}

#[test]
fn string_datasets_are_rendered_next_to_numeric_ones() {
    use hdf5::types::{FixedAscii, VarLenUnicode};

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("robomimic.hdf5");
    {
        let file = hdf5::File::create(&path).unwrap();
        let obs = file.create_group("obs").unwrap();
        obs.new_dataset_builder()
            .with_data(&arr1(&[0.5f32, 1.5]))
            .create("x")
            .unwrap();
        let mask = file.create_group("mask").unwrap();
        let train: Vec<FixedAscii<8>> = ["demo_0", "demo_1"]
            .iter()
            .map(|s| FixedAscii::from_ascii(s.as_bytes()).unwrap())
            .collect();
        mask.new_dataset_builder()
            .with_data(&arr1(&train))
            .create("train")
            .unwrap();
        let note: VarLenUnicode = "teleop".parse().unwrap();
        mask.new_dataset::<VarLenUnicode>()
            .shape(())
            .create("note")
            .unwrap()
            .write_scalar(&note)
            .unwrap();
    }

    let (text, stats) = dump_to_string(&path, DumpOptions::default());

    assert_eq!(stats.datasets, 3);
    assert!(text.contains("Dataset: obs/x\nValue:\n[0.5, 1.5]\n"), "{text}");
    assert!(
        text.contains("Dataset: mask/train\nValue:\n[\"demo_0\", \"demo_1\"]\n"),
        "{text}"
    );
    assert!(text.contains("Dataset: mask/note\nValue:\n\"teleop\"\n"), "{text}");
}

#[test]
fn large_values_are_summarized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("images.hdf5");
    let mut container = Container::open(&path, Mode::Create).unwrap();
    let images = ndarray::Array4::<u8>::from_elem((100, 84, 84, 3), 7);
    container
        .write_array("images", &ArrayData::U8(images.into_dyn()))
        .unwrap();
    container.close().unwrap();

    let (text, stats) = dump_to_string(&path, DumpOptions::default());

    assert_eq!(stats.truncated, 0);
    assert!(text.contains("..."));
    assert!(text.len() < 20_000, "report is {} bytes", text.len());
}

// ============================================================================
// Group Limit
// ============================================================================

#[test]
fn deep_chain_stops_at_group_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chain.hdf5");
    {
        let file = hdf5::File::create(&path).unwrap();
        let mut group = file.create_group("g0").unwrap();
        for depth in 1..150 {
            group = group.create_group(&format!("g{depth}")).unwrap();
        }
    }

    let (text, stats) = dump_to_string(&path, DumpOptions::default());

    assert_eq!(stats.groups_visited, 100);
    assert!(text.matches("Group: ").count() <= 100);
    assert_eq!(stats.pending, 1);
}

#[test]
fn wide_tree_expands_at_most_max_groups() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.hdf5");
    let mut container = Container::open(&path, Mode::Create).unwrap();
    for i in 0..150 {
        container
            .write_array(&format!("ep_{i:03}/x"), &ArrayData::I32(arr0(i).into_dyn()))
            .unwrap();
    }
    container.close().unwrap();

    let (text, stats) = dump_to_string(&path, DumpOptions::default());

    // the root lists all 150 children, but only 99 of them are expanded
    assert_eq!(stats.groups_visited, 100);
    assert_eq!(stats.groups_seen, 150);
    assert_eq!(stats.datasets, 99);
    assert_eq!(stats.pending, 51);
    assert_eq!(text.matches("Dataset: ").count(), 99);
    // LIFO: the last sibling is expanded first
    assert!(text.contains("Dataset: ep_149/x"));
    assert!(!text.contains("Dataset: ep_000/x"));
}

// ============================================================================
// Report Files
// ============================================================================

#[test]
fn view_file_writes_timestamped_report_in_log_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("episode_3.hdf5");
    let mut container = Container::open(&path, Mode::Create).unwrap();
    container
        .write_array("obs/x", &ArrayData::F32(arr1(&[0.5f32, 1.5]).into_dyn()))
        .unwrap();
    container.close().unwrap();
    let config = DumpConfig {
        log_dir: dir.path().join("log"),
        ..DumpConfig::default()
    };

    let mut groups = Vec::new();
    let outcome = view_file(&path, &config, |prefix| groups.push(prefix.to_string())).unwrap();

    assert_eq!(groups, vec!["", "obs"]);
    assert_eq!(outcome.report.parent(), Some(config.log_dir.as_path()));
    let name = outcome.report.file_name().unwrap().to_str().unwrap();
    let stamp = name
        .strip_prefix("episode_3_")
        .and_then(|rest| rest.strip_suffix(".txt"))
        .unwrap();
    assert_eq!(stamp.len(), "YYYYMMDD_HHMMSS".len());
    assert_eq!(stamp.as_bytes()[8], b'_');
    assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));

    let report = fs::read_to_string(&outcome.report).unwrap();
    assert!(report.starts_with("Group: obs\nDataset: obs/x\nValue:\n[0.5, 1.5]\n"));
}

#[test]
fn view_file_on_non_hdf5_input_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "not an hdf5 file").unwrap();
    let config = DumpConfig {
        log_dir: dir.path().join("log"),
        ..DumpConfig::default()
    };

    assert!(view_file(&path, &config, |_| {}).is_err());
}
