#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharKind {
    EditRequired,
    EditOptional,
    Literal,
    Separator,
}

impl CharKind {
    pub fn is_edit(self) -> bool {
        matches!(self, Self::EditRequired | Self::EditOptional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseConversion {
    #[default]
    None,
    ToUpper,
    ToLower,
}

/// Per-position record of the parsed mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharDescriptor {
    pub mask_index: usize,
    pub token: char,
    pub kind: CharKind,
    pub case: CaseConversion,
    pub assigned: bool,
}

impl CharDescriptor {
    pub(super) fn new(mask_index: usize, token: char, kind: CharKind) -> Self {
        Self {
            mask_index,
            token,
            kind,
            case: CaseConversion::None,
            assigned: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.kind.is_edit()
    }
}

/// Outcome classification of a test or edit. Positive values are successes,
/// negative values are rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum ResultHint {
    PositionOutOfRange = -55,
    NonEditPosition = -54,
    UnavailableEditPosition = -53,
    PromptCharNotAllowed = -52,
    InvalidInput = -51,
    SignedDigitExpected = -5,
    LetterExpected = -4,
    DigitExpected = -3,
    AlphanumericCharacterExpected = -2,
    AsciiCharacterExpected = -1,
    Unknown = 0,
    CharacterEscaped = 1,
    NoEffect = 2,
    SideEffect = 3,
    Success = 4,
}

impl ResultHint {
    pub fn is_success(self) -> bool {
        (self as i8) > 0
    }

    pub fn code(self) -> i8 {
        self as i8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of an editing operation: the hint plus the buffer position where
/// the operation took effect (or failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub hint: ResultHint,
    pub position: usize,
}

impl EditOutcome {
    pub fn new(hint: ResultHint, position: usize) -> Self {
        Self { hint, position }
    }

    pub fn succeeded(&self) -> bool {
        self.hint.is_success()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub ignore_password: bool,
    pub include_prompt: bool,
    pub include_literals: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            ignore_password: true,
            include_prompt: true,
            include_literals: true,
        }
    }
}
