/// What a hover block describes, decided from keywords on its title line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    Constructor,
    Destructor,
    StaticMember,
    NormalMember,
    NormalFunc,
    Unknown,
}

impl SignatureKind {
    /// Classify a hover title. Order matters: `class` only means destructor
    /// when no method keyword matched first.
    pub fn classify(title: &str) -> Self {
        if title.contains("constructor") {
            Self::Constructor
        } else if title.contains("static-method") {
            Self::StaticMember
        } else if title.contains("instance-method") {
            Self::NormalMember
        } else if title.contains("class") {
            Self::Destructor
        } else if title.contains("function") {
            Self::NormalFunc
        } else {
            Self::Unknown
        }
    }
}
