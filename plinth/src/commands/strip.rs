use clap::Args;
use eyre::Result;
use plinth_core::{exclude_none, json_dumps, json_loads};

use super::arg_or_stdin;

#[derive(Args)]
pub struct StripCommand {
    /// JSON document (read from stdin when omitted)
    document: Option<String>,
}

impl StripCommand {
    pub fn run(&self) -> Result<()> {
        let text = arg_or_stdin(self.document.as_deref())?;
        println!("{}", strip(&text)?);
        Ok(())
    }
}

fn strip(text: &str) -> Result<String> {
    let document = exclude_none(json_loads(text)?);
    Ok(json_dumps(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip() {
        assert_eq!(
            strip(r#"{"a": 1, "b": null, "c": [1, null, 2]}"#).unwrap(),
            r#"{"a":1,"c":[1,2]}"#
        );
        assert!(strip("not json").is_err());
    }
}
