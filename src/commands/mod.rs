pub mod bundle;
pub mod info;
pub mod split;
