pub mod cfn;
pub mod json;

pub use cfn::CfnStructure;
pub use json::JsonStructure;
