/// What happens to the canvas once a frame has been shown, before the next one is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposal {
    /// No disposal specified; the canvas is left as is.
    #[default]
    None,
    /// Leave the frame in place.
    Keep,
    /// Clear the canvas to transparent.
    Background,
    /// Put the canvas back the way it was before the frame was drawn.
    Previous,
}

impl From<gif::DisposalMethod> for Disposal {
    fn from(m: gif::DisposalMethod) -> Self {
        match m {
            gif::DisposalMethod::Any => Self::None,
            gif::DisposalMethod::Keep => Self::Keep,
            gif::DisposalMethod::Background => Self::Background,
            gif::DisposalMethod::Previous => Self::Previous,
        }
    }
}

impl From<Disposal> for gif::DisposalMethod {
    fn from(d: Disposal) -> Self {
        match d {
            Disposal::None => gif::DisposalMethod::Any,
            Disposal::Keep => gif::DisposalMethod::Keep,
            Disposal::Background => gif::DisposalMethod::Background,
            Disposal::Previous => gif::DisposalMethod::Previous,
        }
    }
}
