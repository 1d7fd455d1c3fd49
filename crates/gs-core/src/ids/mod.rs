//! Identifier newtypes.

mod id_macro;

use id_macro::impl_id;
use serde::{Deserialize, Serialize};

/// Identifier of one staged asset. Fresh for every share request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StagedAssetId(String);

impl_id!(StagedAssetId);
