pub mod standalone_notice;

pub use standalone_notice::StandaloneNotice;
