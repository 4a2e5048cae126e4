use tracing::debug;

use crate::access::PublicRegion;
use crate::member::MemberSignature;
use crate::symbols::ClassSymbol;

use super::{FunctionParts, GeneratedFunction, Placement, upper_first};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    Getter,
    Setter,
    GetterAndSetter,
}

impl Accessor {
    pub const ALL: [Self; 3] = [Self::Getter, Self::Setter, Self::GetterAndSetter];

    pub fn label(self) -> &'static str {
        match self {
            Self::Getter => "Getter",
            Self::Setter => "Setter",
            Self::GetterAndSetter => "Getter & Setter",
        }
    }
}

/// One entry of the accessor picker, e.g. `Getter & Setter (in source)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GetterSetterOption {
    pub accessor: Accessor,
    pub placement: Placement,
}

impl GetterSetterOption {
    pub fn new(
        accessor: Accessor,
        placement: Placement,
    ) -> Self {
        Self { accessor, placement }
    }

    pub fn label(self) -> String {
        format!("{} {}", self.accessor.label(), self.placement.suffix())
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        for placement in [Placement::InHeader, Placement::OutOfLine] {
            let Some(name) = label.strip_suffix(placement.suffix()) else {
                continue;
            };
            let accessor = Accessor::ALL.into_iter().find(|accessor| accessor.label() == name.trim_end())?;
            return Some(Self::new(accessor, placement));
        }
        None
    }
}

fn getter_name(member: &MemberSignature) -> &str {
    &member.canonical_name
}

fn setter_name(member: &MemberSignature) -> String {
    format!("set{}", upper_first(&member.canonical_name))
}

/// Accessor choices for `member`, skipping kinds `class` already declares.
pub fn getter_setter_options(
    class: &ClassSymbol,
    member: &MemberSignature,
) -> Vec<GetterSetterOption> {
    if !member.is_complete() {
        return Vec::new();
    }
    let has_getter = class.has_method(getter_name(member));
    let has_setter = class.has_method(&setter_name(member));

    let mut accessors = Vec::new();
    if !has_getter {
        accessors.push(Accessor::Getter);
    }
    if !has_setter {
        accessors.push(Accessor::Setter);
    }
    if !has_getter && !has_setter {
        accessors.push(Accessor::GetterAndSetter);
    }

    accessors
        .into_iter()
        .flat_map(|accessor| {
            [Placement::InHeader, Placement::OutOfLine].map(|placement| GetterSetterOption::new(accessor, placement))
        })
        .collect()
}

/// Declarations and definitions for `option`. Declarations are indented for
/// the public section they will be inserted into.
pub fn synthesize_getter_setter(
    option: GetterSetterOption,
    member: &MemberSignature,
    region: &PublicRegion,
) -> Vec<GeneratedFunction> {
    if !member.is_complete() {
        debug!("[getter-setter] incomplete member {:?}", member.original_name);
        return Vec::new();
    }
    let parts = match option.accessor {
        Accessor::Getter => vec![getter(member)],
        Accessor::Setter => vec![setter(member)],
        Accessor::GetterAndSetter => vec![getter(member), setter(member)],
    };
    parts
        .iter()
        .map(|part| part.render(option.placement).indented(region.indent()))
        .collect()
}

fn getter(member: &MemberSignature) -> FunctionParts {
    let return_type = if member.is_builtin {
        member.member_type.clone()
    } else {
        format!("const {}&", member.member_type)
    };
    let name = getter_name(member);
    FunctionParts {
        head: format!("{return_type} {name}() const"),
        qualified_head: format!("{return_type} {}::{name}() const", member.class_name),
        body: vec![format!("return this->{};", member.original_name)],
    }
}

fn setter(member: &MemberSignature) -> FunctionParts {
    let param_name = format!("new{}", upper_first(&member.canonical_name));
    let param = if member.is_builtin {
        format!("{} {param_name}", member.member_type)
    } else {
        format!("const {}& {param_name}", member.member_type)
    };
    let name = setter_name(member);
    FunctionParts {
        head: format!("void {name}({param})"),
        qualified_head: format!("void {}::{name}({param})", member.class_name),
        body: vec![format!("this->{} = {param_name};", member.original_name)],
    }
}

#[cfg(test)]
#[path = "../../tests/src/generate/getter_setter_tests.rs"]
mod tests;
