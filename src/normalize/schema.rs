//! Fixed field mapping between raw and normalized episodes.
//!
//! These names are read by downstream training code. Changing any of them
//! breaks that contract.

use crate::container::Dtype;

/// One source dataset copied to one target dataset with a dtype coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub source: &'static str,
    pub target: &'static str,
    pub dtype: Dtype,
}

/// Raw field → normalized field. robot0 is the left camera, robot1 the right.
pub const FIELD_MAP: &[FieldMapping] = &[
    FieldMapping {
        source: "obs/robot0_eye_in_hand_image",
        target: "observation.image.left",
        dtype: Dtype::U8,
    },
    FieldMapping {
        source: "obs/robot1_eye_in_hand_image",
        target: "observation.image.right",
        dtype: Dtype::U8,
    },
    FieldMapping {
        source: "absolute_actions",
        target: CMDS,
        dtype: Dtype::F32,
    },
    FieldMapping {
        source: "obs/joint_positions",
        target: "observation.state",
        dtype: Dtype::F32,
    },
    FieldMapping {
        source: "actions",
        target: "qpos_action",
        dtype: Dtype::F32,
    },
];

/// Target dataset whose first row becomes `init_action`.
pub const CMDS: &str = "cmds";

pub const SIM_ATTR: &str = "sim";

/// This pipeline only handles recordings from real hardware.
pub const SIM_VALUE: bool = false;

pub const INIT_ACTION_ATTR: &str = "init_action";

/// Prefix of normalized output files; inputs carrying it are skipped.
pub const OUTPUT_PREFIX: &str = "processed_";

pub const OUTPUT_EXTENSION: &str = "hdf5";
