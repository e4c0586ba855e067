use modal_lexer::TokenKind;
use std::fmt;

/// Token categories shared by both languages.
///
/// The names follow the usual highlighter hierarchy so a host can map them
/// to styles directly, falling back to a parent when it has no style for a
/// sub-category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Text,
    CommentSingle,
    CommentMultiline,
    Keyword,
    KeywordDeclaration,
    KeywordNamespace,
    KeywordConstant,
    KeywordReserved,
    KeywordType,
    Name,
    NameVariable,
    NameBuiltin,
    NameBuiltinPseudo,
    Number,
    NumberInteger,
    NumberHex,
    NumberFloat,
    String,
    StringRegex,
    Operator,
    OperatorWord,
    Punctuation,
    /// Highlighted on purpose, e.g. the `// BAD CODE` marker in sample code.
    GenericError,
    /// Input no rule recognised.
    Error,
}

impl Category {
    pub const ALL: [Category; 24] = [
        Category::Text,
        Category::CommentSingle,
        Category::CommentMultiline,
        Category::Keyword,
        Category::KeywordDeclaration,
        Category::KeywordNamespace,
        Category::KeywordConstant,
        Category::KeywordReserved,
        Category::KeywordType,
        Category::Name,
        Category::NameVariable,
        Category::NameBuiltin,
        Category::NameBuiltinPseudo,
        Category::Number,
        Category::NumberInteger,
        Category::NumberHex,
        Category::NumberFloat,
        Category::String,
        Category::StringRegex,
        Category::Operator,
        Category::OperatorWord,
        Category::Punctuation,
        Category::GenericError,
        Category::Error,
    ];

    /// Dotted hierarchical name, e.g. `Keyword.Declaration`.
    pub fn dotted_name(self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::CommentSingle => "Comment.Single",
            Category::CommentMultiline => "Comment.Multiline",
            Category::Keyword => "Keyword",
            Category::KeywordDeclaration => "Keyword.Declaration",
            Category::KeywordNamespace => "Keyword.Namespace",
            Category::KeywordConstant => "Keyword.Constant",
            Category::KeywordReserved => "Keyword.Reserved",
            Category::KeywordType => "Keyword.Type",
            Category::Name => "Name",
            Category::NameVariable => "Name.Variable",
            Category::NameBuiltin => "Name.Builtin",
            Category::NameBuiltinPseudo => "Name.Builtin.Pseudo",
            Category::Number => "Number",
            Category::NumberInteger => "Number.Integer",
            Category::NumberHex => "Number.Hex",
            Category::NumberFloat => "Number.Float",
            Category::String => "String",
            Category::StringRegex => "String.Regex",
            Category::Operator => "Operator",
            Category::OperatorWord => "Operator.Word",
            Category::Punctuation => "Punctuation",
            Category::GenericError => "Generic.Error",
            Category::Error => "Error",
        }
    }

    /// The enclosing category, if there is one in this set.
    pub fn parent(self) -> Option<Category> {
        match self {
            Category::KeywordDeclaration
            | Category::KeywordNamespace
            | Category::KeywordConstant
            | Category::KeywordReserved
            | Category::KeywordType => Some(Category::Keyword),
            Category::NameVariable | Category::NameBuiltin => Some(Category::Name),
            Category::NameBuiltinPseudo => Some(Category::NameBuiltin),
            Category::NumberInteger | Category::NumberHex | Category::NumberFloat => {
                Some(Category::Number)
            }
            Category::StringRegex => Some(Category::String),
            Category::OperatorWord => Some(Category::Operator),
            _ => None,
        }
    }

    /// True if `self` is `other` or nested somewhere below it.
    pub fn is_within(self, other: Category) -> bool {
        let mut current = Some(self);
        while let Some(category) = current {
            if category == other {
                return true;
            }
            current = category.parent();
        }
        false
    }

    /// Looks a category up by its dotted name.
    pub fn from_dotted_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.dotted_name() == name)
    }
}

impl TokenKind for Category {
    fn name(&self) -> &'static str {
        self.dotted_name()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dotted_name())
    }
}
