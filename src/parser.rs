use crate::error::{Error, Result};
use crate::snapshot::Snapshot;
use crate::tag::TagId;

/// Fold an ordered tag stream into a [`Snapshot`].
///
/// Every asset belongs to the nearest preceding location tag. An asset read
/// before any location fails with [`Error::Structural`], carrying the 1-based
/// position of the offending tag.
pub fn parse<I>(tags: I) -> Result<Snapshot>
where
    I: IntoIterator<Item = TagId>,
{
    tags.into_iter()
        .enumerate()
        .try_fold(Snapshot::new(), |mut snapshot, (index, tag)| {
            match tag {
                TagId::Location(location) => snapshot.open_visit(location),
                TagId::Asset(asset) => {
                    if !snapshot.push_asset(asset.clone()) {
                        return Err(Error::Structural {
                            asset,
                            position: index + 1,
                        });
                    }
                }
            }
            Ok(snapshot)
        })
}

/// Classify raw tag IDs and parse them.
pub fn parse_raw<I, S>(raw: I) -> Result<Snapshot>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse(raw.into_iter().map(|id| TagId::classify(id.as_ref())))
}
