// Whole-document tests of the MiniASN parser through the public API

use miniasn::{
    ast::{Operand, TypeBody, TypeTarget},
    parse, MiniAsnCompiler, ParserError, SemanticFault,
};

/// Parse a document and return its rendering with all whitespace removed
fn render(source: &str) -> String {
    let program = parse(source).unwrap_or_else(|e| panic!("parsing failed: {e:?}"));
    program.to_string().split_whitespace().collect()
}

fn error(source: &str) -> ParserError {
    match parse(source) {
        Ok(program) => panic!("expected an error, parsed:\n{program}"),
        Err(e) => e,
    }
}

#[test]
fn empty_document() {
    let program = parse("").unwrap();
    assert!(program.declarations.is_empty());

    let program = parse("  -- only a comment\n").unwrap();
    assert!(program.declarations.is_empty());
}

#[test]
fn simple_type_declarations() {
    assert_eq!(render("bit16 ::= BITSTRING_16"), "bit16::=BITSTRING_16");
    assert_eq!(render("int16 ::= UINT_16"), "int16::=UINT_16");
    assert_eq!(render("boole ::= BOOL"), "boole::=BOOL");
}

#[test]
fn simple_types_render_and_parse_again() {
    let source = "a ::= UINT b ::= BITSTRING_8 c ::= BOOL";
    let first = parse(source).unwrap().to_string();
    let second = parse(&first).unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn bool_has_no_width() {
    assert!(matches!(
        error("bool16 ::= BOOL_16"),
        ParserError::Syntax { .. }
    ));
}

#[test]
fn width_must_be_positive() {
    assert!(matches!(
        error("a ::= UINT_0"),
        ParserError::InvalidNumber { .. }
    ));
    assert!(matches!(
        error("a ::= UINT_99999999999"),
        ParserError::InvalidNumber { .. }
    ));
}

#[test]
fn array_declaration() {
    let source = "arr::=ARRAY[g]
        {
            a UINT
        }";
    assert_eq!(render(source), "arr::=ARRAY[g]aUINT");
}

#[test]
fn array_without_argument() {
    let source = "arr::=ARRAY[] { a UINT }";
    assert!(matches!(error(source), ParserError::Syntax { .. }));
}

#[test]
fn array_with_too_many_arguments() {
    let source = "arr::=ARRAY[c d e] { a UINT }";
    assert!(matches!(
        error(source),
        ParserError::ArgumentsLoad {
            expected: 1,
            got: 3,
            ..
        }
    ));
}

#[test]
fn array_field_shadowing_parameter() {
    let source = "arr::=ARRAY[a] { a UINT }";
    assert!(matches!(error(source), ParserError::NameInUse { .. }));
}

#[test]
fn array_of_undeclared_type() {
    let source = "arr::=ARRAY[x] { a type }";
    match error(source) {
        ParserError::NotDeclaredType { name, .. } => assert_eq!(name, "type"),
        e => panic!("unexpected error {e:?}"),
    }
}

#[test]
fn choice_declaration() {
    let source = "choi::=CHOICE[a]
        {
            UINT(a>0 AND a < 100)
            BOOL(a == 0)
            BITSTRING(DEFAULT)
        }";
    assert_eq!(
        render(source),
        "choi::=CHOICE[a]UINT(a>0anda<100)BOOL(a==0)BITSTRING(DEFAULT)"
    );
}

#[test]
fn choice_branches_keep_source_order() {
    let program = parse("c ::= CHOICE[a] { BOOL(a == 1) UINT(DEFAULT) BITSTRING(a == 2) }").unwrap();

    let TypeBody::Choice(choice) = &program.declarations[0].body else {
        panic!("not a choice");
    };
    let names: Vec<_> = choice
        .branches
        .iter()
        .map(|b| b.ty.name.value.as_str())
        .collect();
    assert_eq!(names, ["BOOL", "UINT", "BITSTRING"]);
}

#[test]
fn choice_without_argument() {
    let source = "choi::=CHOICE[] { UINT(DEFAULT) }";
    assert!(matches!(error(source), ParserError::Syntax { .. }));
}

#[test]
fn choice_with_many_arguments() {
    let source = "choi::=CHOICE[a b] { UINT(DEFAULT) }";
    assert_eq!(render(source), "choi::=CHOICE[ab]UINT(DEFAULT)");
}

#[test]
fn choice_without_default() {
    let source = "choi ::= CHOICE[a] { UINT(a == 0) }";
    assert!(matches!(
        error(source),
        ParserError::Semantic {
            fault: SemanticFault::MissingDefault,
            ..
        }
    ));
}

#[test]
fn choice_with_two_defaults() {
    let source = "choi ::= CHOICE[a] { UINT(DEFAULT) BOOL(DEFAULT) }";
    assert!(matches!(
        error(source),
        ParserError::Semantic {
            fault: SemanticFault::DuplicateDefault { first: 21 },
            ..
        }
    ));
}

#[test]
fn choice_of_undeclared_type() {
    let source = "choi ::= CHOICE[a] { type }";
    assert!(matches!(error(source), ParserError::NotDeclaredType { .. }));
}

#[test]
fn condition_precedence_and_grouping() {
    let source = "c ::= CHOICE[a b] {
            UINT(a > 0 or b > 0 and a < 10)
            BOOL((a == 1 or a == 2) AND b != 3)
            BITSTRING(DEFAULT)
        }";
    assert_eq!(
        render(source),
        "c::=CHOICE[ab]UINT(a>0orb>0anda<10)BOOL((a==1ora==2)andb!=3)BITSTRING(DEFAULT)"
    );
}

#[test]
fn condition_with_undeclared_name() {
    let source = "c ::= CHOICE[a] { UINT(b == 1) BOOL(DEFAULT) }";
    match error(source) {
        ParserError::NotDeclaredName { name, .. } => assert_eq!(name, "b"),
        e => panic!("unexpected error {e:?}"),
    }
}

#[test]
fn deeply_nested_condition() {
    let depth = 100;
    let source = format!(
        "c ::= CHOICE[a] {{ UINT({}a == 0{}) BOOL(DEFAULT) }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    assert!(matches!(
        error(&source),
        ParserError::ParserDepthExceeded { .. }
    ));

    let source = "c ::= CHOICE[a] { UINT(((a == 0))) BOOL(DEFAULT) }";
    assert_eq!(render(source), "c::=CHOICE[a]UINT(((a==0)))BOOL(DEFAULT)");
}

#[test]
fn sequence_declaration() {
    let source = "seq::= SEQUENCE[a b c] {
            d UINT_9
            e BOOL
        }";
    assert_eq!(render(source), "seq::=SEQUENCE[abc]dUINT_9eBOOL");
}

#[test]
fn sequence_without_arguments() {
    let source = "seq::= SEQUENCE {
            d UINT_9
            e BOOL
        }";
    assert_eq!(render(source), "seq::=SEQUENCEdUINT_9eBOOL");
}

#[test]
fn sequence_with_empty_brackets() {
    let source = "seq::= SEQUENCE[] { d UINT_9 e BOOL }";
    assert!(matches!(error(source), ParserError::Syntax { .. }));
}

#[test]
fn sequence_field_shadowing_parameter() {
    let source = "seq::= SEQUENCE[a] { a UINT_9 }";
    assert!(matches!(error(source), ParserError::NameInUse { .. }));
}

#[test]
fn sequence_with_duplicate_field() {
    let source = "seq::= SEQUENCE { a UINT a BOOL }";
    assert!(matches!(
        error(source),
        ParserError::NameInUse { first: 18, .. }
    ));
}

#[test]
fn sequence_of_undeclared_type() {
    let source = "seq::= SEQUENCE[a] { a type }";
    assert!(matches!(error(source), ParserError::NotDeclaredType { .. }));
}

#[test]
fn sequence_cannot_refer_to_itself() {
    let source = "s ::= SEQUENCE { x s }";
    assert!(matches!(error(source), ParserError::NotDeclaredType { .. }));
}

#[test]
fn sequence_with_choice_in() {
    let source = "choi ::= CHOICE[a]
        {
            UINT(DEFAULT)
        }
        seq::= SEQUENCE[a] {
            b choi[a]
        }";
    assert_eq!(
        render(source),
        "choi::=CHOICE[a]UINT(DEFAULT)seq::=SEQUENCE[a]bchoi[a]"
    );
}

#[test]
fn sequence_with_choice_many_args_in() {
    let source = "choi ::= CHOICE[a b]
        {
            UINT(DEFAULT)
        }
        seq::= SEQUENCE[a] {
            b choi[a, 2]
        }";
    assert_eq!(
        render(source),
        "choi::=CHOICE[ab]UINT(DEFAULT)seq::=SEQUENCE[a]bchoi[a2]"
    );

    let program = parse(source).unwrap();
    let TypeBody::Sequence(seq) = &program.declarations[1].body else {
        panic!("not a sequence");
    };
    let ty = &seq.attributes[0].ty;
    let TypeTarget::Declared(id) = ty.target else {
        panic!("not a declared type");
    };
    assert_eq!(program.get(id).map(|d| d.name.value.as_str()), Some("choi"));
    assert_eq!(
        ty.values.as_ref().map(|v| v.values[1].clone()),
        Some(Operand::Integer(2))
    );
}

#[test]
fn sequence_with_choice_missing_args() {
    let source = "choi ::= CHOICE[a b]
        {
            UINT(DEFAULT)
        }
        seq::= SEQUENCE[a] {
            b choi[a]
        }";
    assert!(matches!(
        error(source),
        ParserError::ParametersLoad {
            expected: 2,
            got: 1,
            ..
        }
    ));
}

#[test]
fn values_for_builtin_type() {
    let source = "seq ::= SEQUENCE[a] { b UINT[a] }";
    assert!(matches!(
        error(source),
        ParserError::ParametersLoad { expected: 0, .. }
    ));
}

#[test]
fn value_with_undeclared_name() {
    let source = "choi ::= CHOICE[a] { UINT(DEFAULT) }
        seq ::= SEQUENCE { b choi[q] }";
    assert!(matches!(error(source), ParserError::NotDeclaredName { .. }));
}

#[test]
fn duplicate_type_declaration() {
    let source = "a ::= UINT a ::= BOOL";
    assert!(matches!(
        error(source),
        ParserError::NameInUse { first: 0, offset: 11, .. }
    ));
}

#[test]
fn example_file() {
    let source = "bit16 ::= BITSTRING_16
        uint8 ::= UINT_8

        b::=CHOICE[a]
        {
            UINT(a>0 AND a < 100)
            BOOL(a == 0)
            bit16(a == 100 OR a == 110)
            BITSTRING(DEFAULT)
        }

        arr::=ARRAY[g]
        {
            arr b[g]
            c b[3]
        }

        sss::= SEQUENCE[x f e] {
            a UINT_9
            g b[a]
        }

        -- comments are allowed between declarations
        MojaSekwencjaSeq::= SEQUENCE {
            a uint8
            b sss[a 1 1]
        }";

    assert_eq!(
        render(source),
        "bit16::=BITSTRING_16uint8::=UINT_8b::=CHOICE[a]UINT(a>0anda<100)BOOL(a==0)\
         bit16(a==100ora==110)BITSTRING(DEFAULT)arr::=ARRAY[g]arrb[g]cb[3]\
         sss::=SEQUENCE[xfe]aUINT_9gb[a]MojaSekwencjaSeq::=SEQUENCEauint8bsss[a11]"
    );
}

#[test]
fn compiler_keeps_every_file() {
    let mut compiler = MiniAsnCompiler::new();

    let first = compiler
        .add_file("first.asn".to_string(), "a ::= UINT".to_string())
        .unwrap();
    let second = compiler
        .add_file("second.asn".to_string(), "a ::= BOOL".to_string())
        .unwrap();

    assert_eq!(compiler.render(first).as_deref(), Some("a ::= UINT\n"));
    assert_eq!(compiler.render(second).as_deref(), Some("a ::= BOOL\n"));
    assert_eq!(compiler.source_name(second), "second.asn");
}

#[test]
fn syntax_error_lists_expected_tokens() {
    let err = error("a ::= 5");
    assert_eq!(
        err.to_string(),
        "expected `UINT`, `BITSTRING`, `BOOL`, `SEQUENCE`, `ARRAY` or `CHOICE`, found number"
    );
    assert_eq!(err.span(), 6..7);
}
