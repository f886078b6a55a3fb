//! Pre-submission validation

use crate::collection::EntryCollection;
use crate::error::ValidationError;

/// Check that `collection` can be submitted
///
/// Fails with [`ValidationError::EmptySelection`] when there is nothing to
/// send, then with [`ValidationError::MissingClassName`] for the first entry
/// whose label is blank after trimming. `num_images` is bounded at its edit
/// site and not checked here.
pub fn validate(collection: &EntryCollection) -> Result<(), ValidationError> {
    if collection.is_empty() {
        return Err(ValidationError::EmptySelection);
    }

    if let Some(index) = collection
        .iter()
        .position(|entry| entry.class_name().trim().is_empty())
    {
        return Err(ValidationError::MissingClassName { index });
    }

    Ok(())
}
