//! Line editor tests
//!
//! Drive the editor byte by byte through a MemoryStream and inspect the
//! echoed output, the edit buffer and the detected line-ending mode.

use std::cell::Cell;
use std::rc::Rc;

use serial_console::{CommandRegistry, LineEditor, LineEnding, MemoryStream};

fn test_editor() -> LineEditor {
    let mut registry = CommandRegistry::new();
    registry.register_command("ping", "", |_, _| "pong".to_string(), "liveness check");
    registry.register_command("echo", "s", |args, _| args[0].as_text().unwrap().to_string(), "echo back");
    registry.register_command("quiet", "", |_, _| String::new(), "no response");
    LineEditor::new(registry)
}

fn run(editor: &mut LineEditor, io: &mut MemoryStream, bytes: &[u8]) {
    io.feed(bytes);
    editor.poll(io);
}

#[test]
fn poll_without_input_does_nothing() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    editor.poll(&mut io);
    assert!(io.output().is_empty());
}

#[test]
fn lf_terminator_fixes_lf_mode_and_dispatches() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\n");

    assert_eq!(editor.line_ending(), LineEnding::Lf);
    assert_eq!(io.output_str(), "ping\npong\n");
    assert_eq!(editor.line(), "");
}

#[test]
fn crlf_terminator_fixes_crlf_mode() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\r\n");

    assert_eq!(editor.line_ending(), LineEnding::CrLf);
    assert_eq!(io.output_str(), "ping\r\npong\r\n");
}

#[test]
fn bare_cr_fixes_cr_mode_on_the_following_byte() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\rx");

    assert_eq!(editor.line_ending(), LineEnding::Cr);
    // The CR submitted "ping"; the lookahead byte became ordinary input.
    assert_eq!(io.output_str(), "ping\rpong\rx");
    assert_eq!(editor.line(), "x");
}

#[test]
fn mode_never_changes_once_fixed() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\r\n");
    assert_eq!(editor.line_ending(), LineEnding::CrLf);
    io.take_output();

    // A lone LF is not a terminator in CRLF mode.
    run(&mut editor, &mut io, b"ping\n");
    assert_eq!(editor.line(), "ping");
    assert_eq!(io.output_str(), "ping");

    // Only the full CR LF sequence submits.
    run(&mut editor, &mut io, b"\r\n");
    assert_eq!(editor.line_ending(), LineEnding::CrLf);
    assert!(io.output_str().contains("pong"));
    assert_eq!(editor.line(), "");
}

#[test]
fn cr_without_lf_is_not_a_terminator_in_crlf_mode() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\r\n");
    io.take_output();

    // CR followed by a printable byte: no submission, editing continues.
    run(&mut editor, &mut io, b"pi\rng\r\n");
    assert!(io.output_str().contains("pong"));
}

#[test]
fn empty_line_echoes_newline_only() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"\n");

    assert_eq!(io.output_str(), "\n");
}

#[test]
fn empty_response_is_suppressed() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"quiet\n");

    assert_eq!(io.output_str(), "quiet\n");
}

#[test]
fn failed_commands_print_their_error() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"nope\n");

    assert_eq!(io.output_str(), "nope\nE01: unknown command\n");
}

#[test]
fn backspace_deletes_left_of_cursor() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"pinx\x08g\n");

    assert!(io.output_str().ends_with("pong\n"));
}

#[test]
fn backspace_on_empty_line_is_a_no_op() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"\x08");

    assert!(io.output().is_empty());
    assert_eq!(editor.cursor(), 0);
}

#[test]
fn left_arrow_then_insert_splices_mid_line() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    // "png", cursor left twice, insert "i" -> "ping"
    run(&mut editor, &mut io, b"png\x1b[D\x1b[Di");

    assert_eq!(editor.line(), "ping");
    assert_eq!(editor.cursor(), 2);

    run(&mut editor, &mut io, b"\n");
    assert!(io.output_str().ends_with("pong\n"));
}

#[test]
fn right_arrow_reemits_the_character_under_the_cursor() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ab\x1b[D\x1b[D");
    assert_eq!(editor.cursor(), 0);
    io.take_output();

    run(&mut editor, &mut io, b"\x1b[C");
    assert_eq!(editor.cursor(), 1);
    assert_eq!(io.output_str(), "a");

    // Right at end of line does not move.
    run(&mut editor, &mut io, b"\x1b[C\x1b[C");
    assert_eq!(editor.cursor(), 2);
}

#[test]
fn up_arrow_recalls_previous_line() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\n");
    io.take_output();

    run(&mut editor, &mut io, b"\x1b[A");
    assert_eq!(editor.line(), "ping");
    assert_eq!(editor.cursor(), 4);
    assert!(io.output_str().contains("ping"));
}

#[test]
fn up_then_down_walks_history() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\nquiet\n");
    io.take_output();

    run(&mut editor, &mut io, b"\x1b[A");
    assert_eq!(editor.line(), "quiet");
    run(&mut editor, &mut io, b"\x1b[A");
    assert_eq!(editor.line(), "ping");
    run(&mut editor, &mut io, b"\x1b[B");
    assert_eq!(editor.line(), "quiet");
}

#[test]
fn recalled_line_resubmits() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"ping\n");
    io.take_output();

    run(&mut editor, &mut io, b"\x1b[A\n");
    assert!(io.output_str().ends_with("pong\n"));
}

#[test]
fn unsupported_escape_passes_through_as_input() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"\x1bz");

    assert_eq!(editor.line(), "z");
    assert_eq!(io.output_str(), "z");
}

#[test]
fn tab_with_unique_prefix_completes_the_name() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"pi\t");

    assert_eq!(editor.line(), "ping");
    assert_eq!(editor.cursor(), 4);
}

#[test]
fn tab_with_ambiguous_prefix_lists_and_extends_to_common_prefix() {
    let mut registry = CommandRegistry::new();
    registry.register_command("start", "", |_, _| String::new(), "start the thing");
    registry.register_command("stats", "", |_, _| String::new(), "show statistics");
    let mut editor = LineEditor::new(registry);
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"st\t");

    assert_eq!(editor.line(), "sta");
    assert_eq!(editor.cursor(), 3);
    let listing = io.output_str();
    assert!(listing.contains("start"));
    assert!(listing.contains("show statistics"));
}

#[test]
fn tab_without_matches_is_a_no_op() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"zz\t");

    assert_eq!(editor.line(), "zz");
    assert_eq!(io.output_str(), "zz");
}

#[test]
fn tab_completes_math_verbs() {
    let mut registry = CommandRegistry::new();
    let gain = Rc::new(Cell::new(10.0_f64));
    registry.register_math_command(
        "gain",
        Rc::clone(&gain),
        |_out, value, op| format!("gain {} -> {}", op, value),
        "output gain",
    );
    let mut editor = LineEditor::new(registry);
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"gain a\t");
    assert_eq!(editor.line(), "gain add");

    run(&mut editor, &mut io, b" 5\n");
    assert!(io.output_str().contains("gain add -> 15"));
    assert_eq!(gain.get(), 15.0);
}

#[test]
fn ctrl_c_abandons_the_line() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"garbage\x03");

    assert_eq!(editor.line(), "");
    assert_eq!(editor.cursor(), 0);
    assert!(io.output_str().contains("^C"));

    // The abandoned text was never dispatched.
    run(&mut editor, &mut io, b"ping\n");
    assert!(io.output_str().ends_with("pong\n"));
}

#[test]
fn ctrl_u_clears_the_line() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"garbage\x15ping\n");

    assert!(io.output_str().ends_with("pong\n"));
}

#[test]
fn string_arguments_keep_case_through_the_editor() {
    let mut editor = test_editor();
    let mut io = MemoryStream::new();

    run(&mut editor, &mut io, b"Echo Hello\n");

    assert!(io.output_str().ends_with("Hello\n"));
}
