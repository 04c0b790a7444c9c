//! Shared fixtures: HDF5 files laid out the way the recording tools write them.

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2, Array4};
use tempfile::TempDir;

/// Number of joint values per step in the raw fixtures.
pub const JOINTS: usize = 14;

/// Number of action values per step in the raw fixtures.
pub const ACTION_DIM: usize = 7;

/// Write a raw episode with `steps` timesteps.
///
/// Images are already uint8 in some recordings and float64 in others; this
/// fixture uses uint8 for robot0 and float64 for robot1 so both coercions run.
pub fn write_raw_episode(path: &Path, steps: usize) {
    let file = hdf5::File::create(path).unwrap();

    let absolute_actions =
        Array2::from_shape_fn((steps, ACTION_DIM), |(i, j)| i as f64 * 0.5 + j as f64);
    let actions = Array2::from_shape_fn((steps, ACTION_DIM), |(i, j)| (i * j) as f64 * 0.01);
    let dones = Array1::from_shape_fn(steps, |i| (i + 1 == steps) as i64);
    let rewards = Array1::from_shape_fn(steps, |i| i as f64 / 10.0);
    file.new_dataset_builder()
        .with_data(&absolute_actions)
        .create("absolute_actions")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&actions)
        .create("actions")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&dones)
        .create("dones")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&rewards)
        .create("rewards")
        .unwrap();

    let obs = file.create_group("obs").unwrap();
    let agentview = Array4::<u8>::from_elem((steps, 4, 4, 3), 1);
    let left = Array4::from_shape_fn((steps, 4, 4, 3), |(i, _, _, c)| (i * 3 + c) as u8);
    let right = Array4::from_shape_fn((steps, 4, 4, 3), |(i, _, _, c)| (i + c) as f64 + 0.75);
    let joints = Array2::from_shape_fn((steps, JOINTS), |(i, j)| (i + j) as f64 * 0.1);
    obs.new_dataset_builder()
        .with_data(&agentview)
        .create("agentview_images")
        .unwrap();
    obs.new_dataset_builder()
        .with_data(&joints)
        .create("joint_positions")
        .unwrap();
    obs.new_dataset_builder()
        .with_data(&left)
        .create("robot0_eye_in_hand_image")
        .unwrap();
    obs.new_dataset_builder()
        .with_data(&right)
        .create("robot1_eye_in_hand_image")
        .unwrap();
}

/// Write an aggregate file with groups `<prefix>_<i>` under `data` for each index.
pub fn write_aggregate(path: &Path, prefix: &str, indices: impl IntoIterator<Item = usize>) {
    let file = hdf5::File::create(path).unwrap();
    let data = file.create_group("data").unwrap();
    data.new_attr::<i64>()
        .shape(())
        .create("total")
        .unwrap()
        .write_scalar(&0)
        .unwrap();

    for i in indices {
        let episode = data.create_group(&format!("{}_{}", prefix, i)).unwrap();
        let steps = i + 1;
        episode
            .new_attr::<i64>()
            .shape(())
            .create("num_samples")
            .unwrap()
            .write_scalar(&(steps as i64))
            .unwrap();

        let actions = Array2::from_shape_fn((steps, 2), |(r, c)| (i * 100 + r * 2 + c) as f32);
        episode
            .new_dataset_builder()
            .with_data(&actions)
            .create("actions")
            .unwrap();

        let obs = episode.create_group("obs").unwrap();
        let images = Array4::from_shape_fn((steps, 2, 2, 3), |(r, _, _, c)| (i + r + c) as u8);
        obs.new_dataset_builder()
            .with_data(&images)
            .create("images")
            .unwrap();
        obs.new_attr::<bool>()
            .shape(())
            .create("compressed")
            .unwrap()
            .write_scalar(&(i % 2 == 0))
            .unwrap();
    }
}

/// A temp dir holding one raw episode file named `name`.
pub fn temp_raw_episode(name: &str, steps: usize) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    write_raw_episode(&path, steps);
    (dir, path)
}
