use super::*;

#[test]
fn parses_load_with_optional_bounds() {
    assert_eq!(
        parse_command("load"),
        Ok(Command::Load {
            start: None,
            end: None
        })
    );
    assert_eq!(
        parse_command("  LOAD 10 25 "),
        Ok(Command::Load {
            start: Some(10),
            end: Some(25)
        })
    );
    assert_eq!(
        parse_command("load 4"),
        Ok(Command::Load {
            start: Some(4),
            end: None
        })
    );
    assert_eq!(
        parse_command("load ten"),
        Err(CommandError::InvalidIndex("ten".into()))
    );
    assert!(matches!(
        parse_command("load 1 2 3"),
        Err(CommandError::Usage(_))
    ));
}

#[test]
fn parses_navigation_aliases() {
    assert_eq!(parse_command("n"), Ok(Command::Next));
    assert_eq!(parse_command("next"), Ok(Command::Next));
    assert_eq!(parse_command("p"), Ok(Command::Prev));
    assert_eq!(parse_command("exit"), Ok(Command::Quit));
}

#[test]
fn set_keeps_spaces_in_value_and_allows_clearing() {
    assert_eq!(
        parse_command("set popular very high"),
        Ok(Command::Set {
            field: LabelField::Popular,
            value: "very high".into()
        })
    );
    assert_eq!(
        parse_command("set commercial"),
        Ok(Command::Set {
            field: LabelField::Commercial,
            value: String::new()
        })
    );
    assert!(matches!(
        parse_command("set mood good"),
        Err(CommandError::Usage(_))
    ));
}

#[test]
fn parses_switches_and_annotator() {
    assert_eq!(parse_command("skip on"), Ok(Command::Skip(true)));
    assert_eq!(parse_command("show off"), Ok(Command::Show(false)));
    assert!(matches!(parse_command("skip"), Err(CommandError::Usage(_))));
    assert_eq!(
        parse_command("annotator Jamie R"),
        Ok(Command::Annotator("Jamie R".into()))
    );
}

#[test]
fn blank_and_unknown_lines_are_errors() {
    assert_eq!(parse_command("   "), Err(CommandError::Empty));
    assert_eq!(
        parse_command("frobnicate"),
        Err(CommandError::Unknown("frobnicate".into()))
    );
}
