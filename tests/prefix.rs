use std::io::Cursor;

use catch23_packer::PackError;
use catch23_packer::grammar::{GuardCloser, LineKind, match_guard_closer};
use catch23_packer::io::lines::LineReader;
use catch23_packer::model::{FileKind, LineInfo, Packer};
use catch23_packer::prefix::parse_prefix;

fn parse(text: &str, kind: FileKind) -> Result<Packer, PackError> {
    let mut packer = Packer::new("lib/src/file", kind);
    let mut reader = LineReader::new("lib/src/file", Cursor::new(text));
    parse_prefix(&mut packer, &mut reader)?;
    Ok(packer)
}

#[test]
fn line_info_classifies_blank_and_comment_lines() {
    let blank = LineInfo::new(0, "   \n");
    assert!(blank.is_blank);
    assert!(!blank.is_comment);
    assert!(blank.is_blank_or_comment());

    let comment = LineInfo::new(1, "  // Created by someone\n");
    assert!(comment.is_comment);
    assert_eq!(comment.stripped, "// Created by someone");
    assert_eq!(comment.original, "  // Created by someone\n");

    let content = LineInfo::new(2, "int x = 1;");
    assert!(!content.is_blank_or_comment());
}

#[test]
fn line_reader_numbers_lines_and_skips_banner() {
    let mut reader = LineReader::new("f", Cursor::new("//\n\n// banner\nint a;\nint b;"));
    let first = reader
        .skip_blanks_and_comments(None)
        .expect("read succeeds")
        .expect("content line");
    assert_eq!(first.index, 3);
    assert_eq!(first.stripped, "int a;");

    let rest: Vec<_> = reader.map(|line| line.expect("line").original).collect();
    assert_eq!(rest, vec!["int b;".to_string()]);
}

#[test]
fn skip_reports_exhaustion_for_comment_only_input() {
    let mut reader = LineReader::new("f", Cursor::new("// only\n\n"));
    assert!(reader.skip_blanks_and_comments(None).expect("read").is_none());
}

#[test]
fn classify_recognises_directives() {
    assert_eq!(
        LineKind::classify("#include <vector>"),
        LineKind::SystemInclude("vector".into())
    );
    assert_eq!(
        LineKind::classify("#  include <string> // for names"),
        LineKind::SystemInclude("string".into())
    );
    assert_eq!(
        LineKind::classify("#include \"catchkit/checker.h\""),
        LineKind::LocalInclude("catchkit/checker.h".into())
    );
    assert_eq!(
        LineKind::classify("#ifndef CATCHKIT_CHECKER_H"),
        LineKind::GuardOpen("CATCHKIT_CHECKER_H".into())
    );
    assert_eq!(LineKind::classify("#define CATCHKIT_CHECKER_H"), LineKind::GuardDefine);
    assert_eq!(
        LineKind::classify("#endif // CATCHKIT_CHECKER_H"),
        LineKind::GuardClose(" CATCHKIT_CHECKER_H".into())
    );
    assert_eq!(LineKind::classify("#endif"), LineKind::Other);
    assert_eq!(LineKind::classify("namespace CatchKit {"), LineKind::Other);
}

#[test]
fn guard_closer_matches_with_or_without_space() {
    assert_eq!(
        match_guard_closer("#endif // FOO", "FOO"),
        Some(GuardCloser::Conventional)
    );
    assert_eq!(
        match_guard_closer("#endif //FOO", "FOO"),
        Some(GuardCloser::MissingSpace)
    );
    assert_eq!(
        match_guard_closer("#  endif//   FOO", "FOO"),
        Some(GuardCloser::Conventional)
    );
    assert_eq!(match_guard_closer("#endif // BAR", "FOO"), None);
    assert_eq!(match_guard_closer("#endif", "FOO"), None);
}

#[test]
fn header_prefix_records_guard_and_includes() {
    let text = "\
//
// Created by someone.
//

#ifndef CATCHKIT_CHECKER_H
#define CATCHKIT_CHECKER_H

#include \"result_handler.h\"
// interleaved comment
#include <utility>

#include \"catchkit/expr_ref.h\"
namespace CatchKit {
}
#endif // CATCHKIT_CHECKER_H
";
    let packer = parse(text, FileKind::Header).expect("prefix parsed");
    assert_eq!(packer.header_guard.as_deref(), Some("CATCHKIT_CHECKER_H"));
    assert_eq!(packer.system_includes, vec!["utility".to_string()]);
    assert_eq!(
        packer.local_includes,
        vec!["result_handler.h".to_string(), "catchkit/expr_ref.h".to_string()]
    );
    assert_eq!(packer.body_start, Some(12));
}

#[test]
fn source_prefix_ignores_guard_syntax() {
    let text = "#ifndef SOMETHING\n#include <vector>\nint x;\n";
    let packer = parse(text, FileKind::Source).expect("prefix parsed");
    assert_eq!(packer.header_guard, None);
    assert!(packer.system_includes.is_empty());
    assert_eq!(packer.body_start, Some(0));
}

#[test]
fn header_without_guard_is_accepted() {
    let packer = parse("#include <map>\nstruct S {};\n", FileKind::Header).expect("parsed");
    assert_eq!(packer.header_guard, None);
    assert_eq!(packer.system_includes, vec!["map".to_string()]);
    assert_eq!(packer.body_start, Some(1));
}

#[test]
fn include_only_file_has_no_body() {
    let packer = parse("// banner\n#include \"a.h\"\n#include <b>\n\n", FileKind::Source)
        .expect("parsed");
    assert_eq!(packer.local_includes, vec!["a.h".to_string()]);
    assert_eq!(packer.body_start, None);
    assert!(!packer.has_body());
}

#[test]
fn empty_file_has_no_body() {
    let packer = parse("", FileKind::Source).expect("parsed");
    assert_eq!(packer.body_start, None);
    assert!(packer.local_includes.is_empty());
    assert!(packer.system_includes.is_empty());
}

#[test]
fn guard_without_define_is_rejected() {
    let text = "// banner\n#ifndef FOO_H\n\n#define FOO_H\nint x;\n";
    let err = parse(text, FileKind::Header).expect_err("malformed guard");
    match err {
        PackError::MissingGuardDefine { path, line, guard } => {
            assert_eq!(path.to_str(), Some("lib/src/file"));
            assert_eq!(line, 3);
            assert_eq!(guard, "FOO_H");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn guard_at_end_of_file_is_rejected() {
    let err = parse("#ifndef FOO_H\n", FileKind::Header).expect_err("missing define");
    assert!(matches!(err, PackError::MissingGuardDefine { line: 2, .. }));
}

#[test]
fn packer_display_summarises_includes() {
    let packer = parse("#include <a>\n#include \"b.h\"\n#include \"c.h\"\nx\n", FileKind::Source)
        .expect("parsed");
    assert_eq!(
        packer.to_string(),
        "lib/src/file (1 system include(s) and 2 local include(s))"
    );
}
