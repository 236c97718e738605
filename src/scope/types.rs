/// Node kinds assigned to logical lines
use std::fmt;

/// Classification of one logical line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    EndProgram,

    Module,
    EndModule,

    Subroutine,
    EndSubroutine,

    Function,
    EndFunction,

    Interface,
    EndInterface,

    Use,
    Call,

    If,
    IfConstruct,
    ElseIf,
    Else,
    EndIf,

    Do,
    EndDo,

    SelectCase,
    Case,
    EndSelect,

    Declaration,
    Assignment,

    Type,
    EndType,

    // Pseudo-kinds
    Comment,
    Blank,
    Unknown,
}

impl NodeKind {
    /// Kinds that open a nested block in the block tree
    #[must_use]
    pub fn opens_block(self) -> bool {
        matches!(
            self,
            NodeKind::Program
                | NodeKind::Module
                | NodeKind::Subroutine
                | NodeKind::Function
                | NodeKind::Interface
                | NodeKind::IfConstruct
                | NodeKind::Do
                | NodeKind::SelectCase
                | NodeKind::Type
        )
    }

    /// Kinds that close a block in the block tree
    #[must_use]
    pub fn closes_block(self) -> bool {
        matches!(
            self,
            NodeKind::EndProgram
                | NodeKind::EndModule
                | NodeKind::EndSubroutine
                | NodeKind::EndFunction
                | NodeKind::EndInterface
                | NodeKind::EndIf
                | NodeKind::EndDo
                | NodeKind::EndSelect
                | NodeKind::EndType
        )
    }

    /// Blank and Unknown lines carry no information for `prev_kind` tracking
    #[must_use]
    pub fn is_significant(self) -> bool {
        !matches!(self, NodeKind::Blank | NodeKind::Unknown)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Program => "Program",
            NodeKind::EndProgram => "EndProgram",
            NodeKind::Module => "Module",
            NodeKind::EndModule => "EndModule",
            NodeKind::Subroutine => "Subroutine",
            NodeKind::EndSubroutine => "EndSubroutine",
            NodeKind::Function => "Function",
            NodeKind::EndFunction => "EndFunction",
            NodeKind::Interface => "Interface",
            NodeKind::EndInterface => "EndInterface",
            NodeKind::Use => "Use",
            NodeKind::Call => "Call",
            NodeKind::If => "If",
            NodeKind::IfConstruct => "IfConstruct",
            NodeKind::ElseIf => "ElseIf",
            NodeKind::Else => "Else",
            NodeKind::EndIf => "EndIf",
            NodeKind::Do => "Do",
            NodeKind::EndDo => "EndDo",
            NodeKind::SelectCase => "SelectCase",
            NodeKind::Case => "Case",
            NodeKind::EndSelect => "EndSelect",
            NodeKind::Declaration => "Declaration",
            NodeKind::Assignment => "Assignment",
            NodeKind::Type => "Type",
            NodeKind::EndType => "EndType",
            NodeKind::Comment => "Comment",
            NodeKind::Blank => "Blank",
            NodeKind::Unknown => "Unknown",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_and_closes_are_disjoint() {
        let all = [
            NodeKind::Program,
            NodeKind::EndProgram,
            NodeKind::If,
            NodeKind::IfConstruct,
            NodeKind::ElseIf,
            NodeKind::Else,
            NodeKind::EndIf,
            NodeKind::Type,
            NodeKind::EndType,
            NodeKind::Case,
            NodeKind::Unknown,
        ];
        for kind in all {
            assert!(!(kind.opens_block() && kind.closes_block()), "{kind}");
        }
    }

    #[test]
    fn test_plain_if_does_not_open_block() {
        assert!(!NodeKind::If.opens_block());
        assert!(NodeKind::IfConstruct.opens_block());
        assert!(!NodeKind::Else.opens_block());
        assert!(!NodeKind::Case.closes_block());
    }

    #[test]
    fn test_is_significant() {
        assert!(!NodeKind::Blank.is_significant());
        assert!(!NodeKind::Unknown.is_significant());
        assert!(NodeKind::Comment.is_significant());
        assert!(NodeKind::Assignment.is_significant());
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeKind::EndSubroutine.to_string(), "EndSubroutine");
        assert_eq!(format!("{:>6}", NodeKind::Do), "    Do");
    }
}
