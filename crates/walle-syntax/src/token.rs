use walle_common::types::Span;

use std::fmt::{self, Display, Formatter};

/// A single lexical token together with its source location. `line` and
/// `column` are 1-based; `span` is the byte range within the source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    // Instructions.
    Spawn,
    Color,
    Size,
    DrawLine,
    DrawCircle,
    DrawRectangle,
    Fill,
    Goto,

    // Built-in query functions.
    GetActualX,
    GetActualY,
    GetCanvasSize,
    GetColorCount,
    IsBrushColor,
    IsBrushSize,
    IsCanvasColor,

    // Literals.
    Number(i64),
    String(String),
    True,
    False,
    Identifier(String),

    // Operators.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    EqualEqual,
    BangEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    And,
    Or,
    Not,

    // Punctuation.
    LtParen,
    RtParen,
    LtBracket,
    RtBracket,
    Comma,
    Colon,
    Arrow,

    // Layout.
    Comment,
    Eol,
    Eof,
}

impl TokenKind {
    /// The keyword table: identifiers are matched against it
    /// case-insensitively.
    pub fn keyword(identifier: &str) -> Option<TokenKind> {
        let kind = match identifier.to_ascii_lowercase().as_str() {
            "spawn" => TokenKind::Spawn,
            "color" => TokenKind::Color,
            "size" => TokenKind::Size,
            "drawline" => TokenKind::DrawLine,
            "drawcircle" => TokenKind::DrawCircle,
            "drawrectangle" => TokenKind::DrawRectangle,
            "fill" => TokenKind::Fill,
            "goto" => TokenKind::Goto,
            "getactualx" => TokenKind::GetActualX,
            "getactualy" => TokenKind::GetActualY,
            "getcanvassize" => TokenKind::GetCanvasSize,
            "getcolorcount" => TokenKind::GetColorCount,
            "isbrushcolor" => TokenKind::IsBrushColor,
            "isbrushsize" => TokenKind::IsBrushSize,
            "iscanvascolor" => TokenKind::IsCanvasColor,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Spawn => write!(f, "'Spawn'"),
            TokenKind::Color => write!(f, "'Color'"),
            TokenKind::Size => write!(f, "'Size'"),
            TokenKind::DrawLine => write!(f, "'DrawLine'"),
            TokenKind::DrawCircle => write!(f, "'DrawCircle'"),
            TokenKind::DrawRectangle => write!(f, "'DrawRectangle'"),
            TokenKind::Fill => write!(f, "'Fill'"),
            TokenKind::Goto => write!(f, "'GoTo'"),
            TokenKind::GetActualX => write!(f, "'GetActualX'"),
            TokenKind::GetActualY => write!(f, "'GetActualY'"),
            TokenKind::GetCanvasSize => write!(f, "'GetCanvasSize'"),
            TokenKind::GetColorCount => write!(f, "'GetColorCount'"),
            TokenKind::IsBrushColor => write!(f, "'IsBrushColor'"),
            TokenKind::IsBrushSize => write!(f, "'IsBrushSize'"),
            TokenKind::IsCanvasColor => write!(f, "'IsCanvasColor'"),
            TokenKind::Number(_) => write!(f, "number"),
            TokenKind::String(_) => write!(f, "string"),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Identifier(name) => write!(f, "identifier {name:?}"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::EqualEqual => write!(f, "'=='"),
            TokenKind::BangEqual => write!(f, "'!='"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::GreaterEqual => write!(f, "'>='"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::LessEqual => write!(f, "'<='"),
            TokenKind::And => write!(f, "'and'"),
            TokenKind::Or => write!(f, "'or'"),
            TokenKind::Not => write!(f, "'not'"),
            TokenKind::LtParen => write!(f, "'('"),
            TokenKind::RtParen => write!(f, "')'"),
            TokenKind::LtBracket => write!(f, "'['"),
            TokenKind::RtBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Arrow => write!(f, "'<-'"),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Eol => write!(f, "end of line"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}
