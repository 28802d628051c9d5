use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, preceded, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::FieldType;

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Field names ------------------------------------------------------------

fn field_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
    })
    .parse_next(input)
}

// -- Types ------------------------------------------------------------------

fn field_type(input: &mut &str) -> ModalResult<FieldType> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric())
        .try_map(str::parse::<FieldType>)
        .context(StrContext::Expected(StrContextValue::Description(
            "field type (int32, uint32, float, double, string)",
        )))
        .parse_next(input)
}

// -- Entries ----------------------------------------------------------------

fn entry(input: &mut &str) -> ModalResult<(String, FieldType)> {
    let name = field_name.parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let ty = cut_err(field_type).parse_next(input)?;
    Ok((name.to_owned(), ty))
}

pub(super) fn schema(input: &mut &str) -> ModalResult<Vec<(String, FieldType)>> {
    let entries: Vec<(String, FieldType)> = repeat(0.., preceded(ws, entry)).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<(String, FieldType)>, String> {
        schema.parse(input).map_err(|e| e.to_string())
    }

    #[test]
    fn single_entry() {
        assert_eq!(
            parse("V: int32").unwrap(),
            vec![("V".to_owned(), FieldType::Int32)]
        );
    }

    #[test]
    fn entries_keep_declaration_order() {
        let entries = parse("V: int32\nratio: double\nE: string\n").unwrap();
        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["V", "ratio", "E"]);
        assert_eq!(entries[1].1, FieldType::Double);
    }

    #[test]
    fn comments_and_blank_lines() {
        let input = "\n# routing fields\nV : int32   # client version\n\n  E:string\n";
        let entries = parse(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], ("E".to_owned(), FieldType::String));
    }

    #[test]
    fn empty_schema() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  # nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn dotted_and_dashed_names() {
        let entries = parse("user.age: uint32\nab-group: string").unwrap();
        assert_eq!(entries[0].0, "user.age");
        assert_eq!(entries[1].0, "ab-group");
    }

    #[test]
    fn unknown_type_fails() {
        assert!(parse("V: int16").is_err());
        assert!(parse("V: int64").is_err());
    }

    #[test]
    fn missing_colon_fails() {
        assert!(parse("V int32").is_err());
    }

    #[test]
    fn trailing_garbage_fails() {
        assert!(parse("V: int32 !").is_err());
    }
}
