use crate::trace::parse_key_values;

#[test]
fn key_values_parses_eq_pairs_inside_parens() {
    let kv = parse_key_values("(SA=00:11 DA=00:22)");
    assert_eq!(kv.len(), 2);
    assert_eq!(kv["SA"], "00:11");
    assert_eq!(kv["DA"], "00:22");
}

#[test]
fn key_values_mixes_both_syntaxes() {
    let kv = parse_key_values("  (Direction(DOWN) NextHop(0001) TxTime=+9.92e+07ns)  ");
    assert_eq!(kv["Direction"], "DOWN");
    assert_eq!(kv["NextHop"], "0001");
    assert_eq!(kv["TxTime"], "+9.92e+07ns");
}

#[test]
fn key_values_last_write_wins_across_syntaxes() {
    // `Name=Value` 在 `Name(Value)` 之后收集
    let kv = parse_key_values("Size(10) Size=20");
    assert_eq!(kv["Size"], "20");

    let kv = parse_key_values("Hop(1) Hop(2)");
    assert_eq!(kv["Hop"], "2");
}

#[test]
fn key_values_keeps_escaped_close_paren() {
    let kv = parse_key_values(r"Note(a\)b) Next(1)");
    assert_eq!(kv["Note"], r"a\)b");
    assert_eq!(kv["Next"], "1");
}

#[test]
fn key_values_without_matches_is_empty() {
    assert!(parse_key_values("").is_empty());
    assert!(parse_key_values("()").is_empty());
    assert!(parse_key_values("just some words").is_empty());
}
