/// append strategy binding a path to the search direction that builds it.
///
/// forward searches append at the tail. retrospective searches prepend at
/// the head and swap the (from, to) role of their arguments, so a finished
/// path reads chronologically whichever direction produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathDirection {
    Forward,
    Retrospective,
}
