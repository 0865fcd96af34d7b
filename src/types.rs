use std::rc::Rc;

/// A type alias for a game string.
/// Roughly meant to represent a raw string from a game data file, reference counted so that it exists once in memory.
/// Actually a [Rc] around a [str].
/// Comparisons might not work because compiler shenanigans, try [Rc::as_ref] when in doubt
pub type GameString = Rc<str>;
