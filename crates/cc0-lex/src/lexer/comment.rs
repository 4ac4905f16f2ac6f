//! Whitespace and `//` line-comment skipping (§4.2).

use crate::cursor::Cursor;

pub fn skip_trivia(cursor: &mut Cursor) {
    loop {
        match cursor.peek() {
            Some(b' ') | Some(b'\t') | Some(b'\n') => {
                cursor.next();
            }
            Some(b'/') if cursor.peek_ahead(1) == Some(b'/') => {
                skip_line_comment(cursor);
            }
            _ => break,
        }
    }
}

fn skip_line_comment(cursor: &mut Cursor) {
    cursor.next();
    cursor.next();
    loop {
        match cursor.peek() {
            None => break,
            Some(b'\n') => {
                cursor.next();
                break;
            }
            Some(_) => {
                cursor.next();
            }
        }
    }
}
