use crate::ast::{Atom, Head, Literal, Statement};
use crate::{Comparison, Term};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char as nomchar, digit1, multispace0, multispace1, satisfy},
    combinator::{eof, map as nommap, not, opt, recognize, value},
    error::ParseError,
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};
pub type IResult<I, O, E = nom::error::VerboseError<I>> = Result<(I, O), nom::Err<E>>;

//////////////////////////////////////

type In<'a> = &'a str;

pub fn wsl<'a, F, O, E>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O, E>
where
    E: ParseError<In<'a>>,
    F: FnMut(In<'a>) -> IResult<In<'a>, O, E> + 'a,
{
    preceded(multispace0, inner)
}

/// `inner`, then nothing but whitespace.
pub fn ended<'a, F, O>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O>
where
    F: FnMut(In<'a>) -> IResult<In<'a>, O> + 'a,
{
    terminated(inner, pair(multispace0, eof))
}

pub fn identifier(s: In) -> IResult<In, In> {
    let head = satisfy(|c| c.is_alphabetic() || c == '_');
    wsl(recognize(pair(head, take_while(|c: char| c.is_alphanumeric() || c == '_'))))(s)
}

pub fn quoted(s: In) -> IResult<In, In> {
    wsl(delimited(nomchar('\''), take_while1(|c: char| c != '\''), nomchar('\'')))(s)
}

pub fn number(s: In) -> IResult<In, In> {
    wsl(recognize(pair(opt(nomchar('-')), pair(digit1, opt(pair(nomchar('.'), digit1))))))(s)
}

pub fn term(s: In) -> IResult<In, Term> {
    let con = nommap(alt((quoted, number)), Term::constant);
    let var = nommap(identifier, Term::var);
    alt((con, var))(s)
}

pub fn atom(s: In) -> IResult<In, Atom> {
    let args = delimited(wsl(nomchar('(')), separated_list0(sep, term), wsl(nomchar(')')));
    nommap(pair(identifier, args), |(predicate, terms)| Atom {
        predicate: predicate.to_owned(),
        terms,
    })(s)
}

pub fn neg(s: In) -> IResult<In, In> {
    wsl(alt((tag("!"), terminated(tag("not"), multispace1))))(s)
}

pub fn sep(s: In) -> IResult<In, In> {
    wsl(tag(","))(s)
}

pub fn comparison(s: In) -> IResult<In, Comparison> {
    wsl(alt((
        value(Comparison::Le, tag("<=")),
        value(Comparison::Ge, tag(">=")),
        value(Comparison::Ne, tag("<>")),
        value(Comparison::Ne, tag("!=")),
        value(Comparison::Lt, tag("<")),
        value(Comparison::Gt, tag(">")),
        value(Comparison::Eq, tag("=")),
    )))(s)
}

pub fn boolean(s: In) -> IResult<In, bool> {
    let word = alt((value(true, tag("true")), value(false, tag("false"))));
    wsl(terminated(word, not(satisfy(|c: char| c.is_alphanumeric() || c == '_' || c == '('))))(s)
}

pub fn literal(s: In) -> IResult<In, Literal> {
    let negated = nommap(preceded(neg, atom), |atom| Literal::Atom { atom, positive: false });
    let positive = nommap(atom, |atom| Literal::Atom { atom, positive: true });
    let compared = nommap(tuple((term, comparison, term)), |(l, op, r)| Literal::Comparison(l, op, r));
    let constant = nommap(boolean, Literal::Boolean);
    alt((negated, positive, compared, constant))(s)
}

pub fn body(s: In) -> IResult<In, Vec<Literal>> {
    separated_list1(sep, literal)(s)
}

pub fn head(s: In) -> IResult<In, Head> {
    let equality = nommap(tuple((term, wsl(tag("=")), term)), |(l, _, r)| Head::Equality(l, r));
    let atoms = nommap(separated_list1(sep, atom), Head::Atoms);
    alt((atoms, equality))(s)
}

pub fn arrow(s: In) -> IResult<In, In> {
    wsl(tag("->"))(s)
}

pub fn turnstile(s: In) -> IResult<In, In> {
    wsl(tag(":-"))(s)
}

pub fn rulesep(s: In) -> IResult<In, In> {
    wsl(recognize(nomchar('.')))(s)
}

pub fn statement(s: In) -> IResult<In, Statement> {
    let rule = nommap(pair(atom, preceded(turnstile, body)), |(head, body)| Statement::Rule {
        head,
        body,
    });
    let dependency = nommap(pair(body, preceded(arrow, head)), |(body, head)| {
        Statement::Dependency { body, head }
    });
    terminated(alt((rule, dependency)), rulesep)(s)
}

pub fn program(s: In) -> IResult<In, Vec<Statement>> {
    many0(statement)(s)
}

/// A bare literal list, optionally closed by a `.`.
pub fn literal_list(s: In) -> IResult<In, Vec<Literal>> {
    terminated(body, opt(rulesep))(s)
}

#[test]
fn parses_tgd_with_existential() {
    let (rest, statement) = statement("P(x) -> Q(x, y).").expect("parses");
    assert_eq!(rest, "");
    let Statement::Dependency { body, head: Head::Atoms(head) } = statement else {
        panic!("not a tgd: {statement:?}");
    };
    assert_eq!(body.len(), 1);
    assert_eq!(head[0].predicate, "Q");
    assert_eq!(head[0].terms, vec![Term::var("x"), Term::var("y")]);
}

#[test]
fn parses_egd_and_builtins() {
    let (_, statement) = statement("E(i, x), E(i, y), x <> 'a', not F(x) -> x = y.").expect("parses");
    let Statement::Dependency { body, head } = statement else { panic!() };
    assert_eq!(head, Head::Equality(Term::var("x"), Term::var("y")));
    assert_eq!(body[2], Literal::Comparison(Term::var("x"), Comparison::Ne, Term::constant("a")));
    assert!(matches!(body[3], Literal::Atom { positive: false, .. }));
}

#[test]
fn parses_derivation_rule() {
    let (_, statement) = statement("D(x) :- P(x, 3), true.").expect("parses");
    let Statement::Rule { head, body } = statement else { panic!() };
    assert_eq!(head.predicate, "D");
    assert_eq!(body[1], Literal::Boolean(true));
}
