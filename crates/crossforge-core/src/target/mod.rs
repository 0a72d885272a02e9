pub mod key;
pub mod registry;

pub use key::{TargetFamily, TargetId, UnknownTargetError};
pub use registry::{
    list_targets, lookup, registry, targets_by_family, StaticLinkSupport, TargetAvailability,
    TargetDescriptor, ToolchainProfile,
};
