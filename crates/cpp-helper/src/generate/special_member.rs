use tracing::debug;

use super::{FunctionParts, GeneratedFunction, Placement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMember {
    Constructor,
    Destructor,
    CopyConstructor,
    MoveConstructor,
    CopyAssignment,
    MoveAssignment,
}

impl SpecialMember {
    pub const ALL: [Self; 6] = [
        Self::Constructor,
        Self::Destructor,
        Self::CopyConstructor,
        Self::MoveConstructor,
        Self::CopyAssignment,
        Self::MoveAssignment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Destructor => "destructor",
            Self::CopyConstructor => "copy constructor",
            Self::MoveConstructor => "move constructor",
            Self::CopyAssignment => "copy assignment",
            Self::MoveAssignment => "move assignment",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|member| member.label() == label)
    }

    fn parts(
        self,
        class: &str,
    ) -> FunctionParts {
        let (head, qualified_head) = match self {
            Self::Constructor => (format!("{class}()"), format!("{class}::{class}()")),
            Self::Destructor => (format!("virtual ~{class}()"), format!("{class}::~{class}()")),
            Self::CopyConstructor => (
                format!("{class}(const {class}& other)"),
                format!("{class}::{class}(const {class}& other)"),
            ),
            Self::MoveConstructor => (
                format!("{class}({class}&& other) noexcept"),
                format!("{class}::{class}({class}&& other) noexcept"),
            ),
            Self::CopyAssignment => (
                format!("{class}& operator=(const {class}& other)"),
                format!("{class}& {class}::operator=(const {class}& other)"),
            ),
            Self::MoveAssignment => (
                format!("{class}& operator=({class}&& other) noexcept"),
                format!("{class}& {class}::operator=({class}&& other) noexcept"),
            ),
        };
        FunctionParts {
            head,
            qualified_head,
            body: Vec::new(),
        }
    }
}

/// Render the requested special members of `class_name` in request order.
/// An empty class name yields nothing.
pub fn synthesize_special_members(
    members: &[SpecialMember],
    class_name: &str,
    placement: Placement,
    indent: &str,
) -> Vec<GeneratedFunction> {
    if class_name.is_empty() {
        debug!("[special-member] no enclosing class");
        return Vec::new();
    }
    members
        .iter()
        .map(|member| member.parts(class_name).render(placement).indented(indent))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src/generate/special_member_tests.rs"]
mod tests;
