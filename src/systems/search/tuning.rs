/// Number of candidates scored between checks for a superseded query.
pub const ABORT_CHECK_INTERVAL: usize = 512;

/// Relevance shared by every content match; content results keep index order.
pub const CONTENT_MATCH_SCORE: u32 = 100;

/// Characters of a matching line kept in a content label.
pub const CONTENT_LINE_CHARS: usize = 80;
