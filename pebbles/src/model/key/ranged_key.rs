use super::KeyError;

/// field separator in encoded keys. id fields may not contain it.
pub const SEPARATOR: char = '|';

/// sentinel for synthetic upper range bounds. it sorts above every
/// character permitted in id and uniquifier fields, so id fields may not
/// contain it.
pub const SENTINEL: char = '~';

/// lowest character permitted in id fields, used to fill trailing id
/// fields of synthetic lower range bounds.
pub const ID_MIN: char = '!';

/// width of the random uniquifier suffix carried by keys that may store
/// multiple values under one (prefix, ordered-field) pair.
pub const UNIQUIFIER_LEN: usize = 8;

/// a composite key with a canonical sortable string encoding.
///
/// the encoding contract: lexicographic order of encoded strings equals the
/// intended (prefix, then numeric/temporal, then tiebreak) order, which
/// implementations achieve with fixed-width zero-padded numeric and time
/// fields. a closed scan `[range_min, range_max]` over encoded-string order
/// returns exactly the entries sharing the key's logical prefix.
///
/// field values outside a key's declared domain are rejected when the key
/// is constructed, never at encode time.
pub trait RangedKey: Sized {
    /// canonical sortable string form of this key.
    fn encode(&self) -> String;

    /// total inverse of [`RangedKey::encode`] for syntactically valid
    /// strings; anything else fails with a materialization error.
    fn decode(encoded: &str) -> Result<Self, KeyError>;

    /// lower bounding key for all entries sharing this key's logical prefix.
    fn range_min(&self) -> Self;

    /// upper bounding key for all entries sharing this key's logical prefix.
    /// bounds are synthetic: they encode correctly for use as scan limits
    /// but are never stored entries and need not themselves decode.
    fn range_max(&self) -> Self;
}
