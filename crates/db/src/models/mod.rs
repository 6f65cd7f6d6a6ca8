//! Database row structs and their conversions to domain types.

pub mod invitation_override;
pub mod media_asset;
