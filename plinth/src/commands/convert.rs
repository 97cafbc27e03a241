use clap::{Args, ValueEnum};
use eyre::Result;
use plinth_core::{pascal_to_snake, snake_to_pascal, to_camel_case, to_kebab_case};

/// Target naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Case {
    /// lower_case_with_underscores
    Snake,
    /// CapitalizedWords
    Pascal,
    /// camelCase
    Camel,
    /// kebab-case
    Kebab,
}

#[derive(Args)]
pub struct ConvertCommand {
    /// Naming convention to convert to
    #[arg(value_enum)]
    case: Case,

    /// Identifier to convert
    value: String,

    /// Keep dots when converting to snake case
    #[arg(long)]
    keep_dots: bool,
}

impl ConvertCommand {
    pub fn run(&self) -> Result<()> {
        println!("{}", convert(self.case, &self.value, self.keep_dots));
        Ok(())
    }
}

fn convert(case: Case, value: &str, keep_dots: bool) -> String {
    match case {
        Case::Snake => pascal_to_snake(value, !keep_dots),
        Case::Pascal => snake_to_pascal(value),
        Case::Camel => to_camel_case(value),
        Case::Kebab => to_kebab_case(value),
    }
}
