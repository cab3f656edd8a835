/// Drops `#` line comments. A `#` inside a quoted constant is kept.
pub fn comments_removed(mut s: String) -> String {
    #[derive(Copy, Clone)]
    enum State {
        Outside,
        Quoted,
        LineComment,
    }
    use State::*;
    let mut state = Outside;
    s.retain(|c| {
        let (new_state, retain) = match (state, c) {
            (Outside, '#') => (LineComment, false),
            (Outside, '\'') => (Quoted, true),
            (Quoted, '\'') => (Outside, true),
            (LineComment, '\n') => (Outside, true),
            (LineComment, _) => (LineComment, false),
            (s, _) => (s, true),
        };
        state = new_state;
        retain
    });
    s
}

#[test]
fn comments_stop_at_line_end() {
    let s = comments_removed("P(x) -> Q(x). # note\nQ('#1') -> R(x).".to_owned());
    assert_eq!(s, "P(x) -> Q(x). \nQ('#1') -> R(x).");
}
