/// Verb named by the first word of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    List,
    Select,
    Back,
    Close,
    Add,
    Edit,
    Help,
    /// Not a keyword; the whole line is the parameter.
    Default,
}

const ALIASES: &[(&str, CommandType)] = &[
    ("list", CommandType::List),
    ("ls", CommandType::List),
    ("l", CommandType::List),
    ("select", CommandType::Select),
    ("s", CommandType::Select),
    ("back", CommandType::Back),
    ("b", CommandType::Back),
    ("up", CommandType::Back),
    ("close", CommandType::Close),
    ("c", CommandType::Close),
    ("add", CommandType::Add),
    ("a", CommandType::Add),
    ("edit", CommandType::Edit),
    ("e", CommandType::Edit),
    ("help", CommandType::Help),
    ("h", CommandType::Help),
    ("?", CommandType::Help),
];

impl CommandType {
    /// Look up a keyword, ignoring case.
    pub fn from_keyword(word: &str) -> Self {
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(word))
            .map_or(Self::Default, |(_, kind)| *kind)
    }

    /// All aliases of this verb, in table order.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, kind)| *kind == self)
            .map(|(alias, _)| *alias)
    }
}
