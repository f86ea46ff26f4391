pub mod stage0_load;
pub mod stage1_recast;
pub mod stage2_merge;
pub mod stage3_write;

pub use stage0_load::*;
pub use stage1_recast::*;
pub use stage2_merge::*;
pub use stage3_write::*;
