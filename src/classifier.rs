// Line classification for fixed-width play scripts.
// WHY: attribution depends on the exact indentation convention below; a more
// lenient parser would move words between speakers.

/// Indent that opens a new speaker: `  NAME. dialogue`
pub const HEADER_INDENT: &str = "  ";

/// Indent that continues the active speaker: `    more dialogue`
pub const CONTINUATION_INDENT: &str = "    ";

/// Byte offset at which continuation dialogue begins
pub const CONTINUATION_START: usize = CONTINUATION_INDENT.len();

/// Terminates the speaker name on a header line
pub const NAME_TERMINATOR: char = '.';

/// Coarse kind of a script line, for diagnostics and tests that do not care
/// about names or offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    NewSpeaker,
    Continuation,
    NonDialogue,
}

/// Result of classifying one line against the previously active speaker.
///
/// Offsets are byte offsets into the line. Indents and the name terminator
/// are ASCII, so every offset is also a char boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// `  NAME. dialogue`, name borrowed from the line
    NewSpeaker { name: &'a str, dialogue_start: usize },
    /// `    dialogue`, attributed to the prior speaker if there is one
    Continuation {
        speaker: Option<&'a str>,
        dialogue_start: usize,
    },
    /// Stage direction, blank line, malformed header, any other indent
    NonDialogue,
}

impl<'a> LineClass<'a> {
    /// Drops the borrowed parts
    pub fn kind(&self) -> LineKind {
        match self {
            LineClass::NewSpeaker { .. } => LineKind::NewSpeaker,
            LineClass::Continuation { .. } => LineKind::Continuation,
            LineClass::NonDialogue => LineKind::NonDialogue,
        }
    }

    /// Offset where spoken text begins, `None` for non-dialogue
    pub fn dialogue_start(&self) -> Option<usize> {
        match self {
            LineClass::NewSpeaker { dialogue_start, .. }
            | LineClass::Continuation { dialogue_start, .. } => Some(*dialogue_start),
            LineClass::NonDialogue => None,
        }
    }

    /// Speaker the line's words belong to, if any
    pub fn speaker(&self) -> Option<&'a str> {
        match self {
            LineClass::NewSpeaker { name, .. } => Some(*name),
            LineClass::Continuation { speaker, .. } => *speaker,
            LineClass::NonDialogue => None,
        }
    }

    /// True when the line yields a contribution
    pub fn is_attributed(&self) -> bool {
        self.speaker().is_some()
    }
}

/// Classify `line` given the speaker active before it.
///
/// Rules, in order:
/// 1. exactly two leading spaces then a non-space opens a new speaker; the name
///    runs up to the first `.` and dialogue starts right after it. A header
///    with no `.`, an empty name, or nothing after the `.` is non-dialogue.
/// 2. exactly four leading spaces then a non-space continues `prior`.
/// 3. anything else is non-dialogue.
///
/// ```
/// use bardtally::classifier::{classify, LineClass};
///
/// let class = classify("  HAMLET. To be", None);
/// assert_eq!(class, LineClass::NewSpeaker { name: "HAMLET", dialogue_start: 9 });
/// ```
pub fn classify<'a>(line: &'a str, prior: Option<&'a str>) -> LineClass<'a> {
    if let Some(rest) = opens_with_indent(line, HEADER_INDENT) {
        let name_len = match rest.find(NAME_TERMINATOR) {
            Some(0) | None => return LineClass::NonDialogue,
            Some(name_len) => name_len,
        };
        let dialogue_start = HEADER_INDENT.len() + name_len + NAME_TERMINATOR.len_utf8();
        // A header must carry dialogue after its terminator
        if dialogue_start >= line.len() {
            return LineClass::NonDialogue;
        }
        return LineClass::NewSpeaker {
            name: &rest[..name_len],
            dialogue_start,
        };
    }

    if opens_with_indent(line, CONTINUATION_INDENT).is_some() {
        return LineClass::Continuation {
            speaker: prior.filter(|name| !name.is_empty()),
            dialogue_start: CONTINUATION_START,
        };
    }

    LineClass::NonDialogue
}

/// Strip `indent` when it is followed by at least one non-space character
fn opens_with_indent<'a>(line: &'a str, indent: &str) -> Option<&'a str> {
    line.strip_prefix(indent)
        .filter(|rest| !rest.is_empty() && !rest.starts_with(' '))
}
