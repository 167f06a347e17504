use serde::Serializer;

/// Serialize a list of byte strings as a list of hex strings.
pub(crate) fn serialize_list<S: Serializer>(
    items: &[Vec<u8>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(items.iter().map(hex::encode))
}
