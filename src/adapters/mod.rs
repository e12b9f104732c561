pub mod cfn_lint;
pub mod cfn_nag;
