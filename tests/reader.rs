#[cfg(test)]
mod reader_tests {
    use scheme_interpreter as scheme;

    use scheme::error::SchemeError;
    use scheme::reader::{tokenize, Reader};
    use scheme::syntax::Syntax;

    fn read_all(source: &str) -> Result<Vec<Syntax>, SchemeError> {
        let tokens = tokenize(source)?;
        Reader::new(&tokens).read_all()
    }

    fn sym(s: &str) -> Syntax {
        Syntax::Symbol(s.to_owned())
    }

    #[test]
    fn reads_nested_lists() {
        let data = read_all("(+ 1 (* 2 3))").expect("valid input");

        assert_eq!(
            data,
            vec![Syntax::List(vec![
                sym("+"),
                Syntax::Number(1),
                Syntax::List(vec![sym("*"), Syntax::Number(2), Syntax::Number(3)]),
            ])]
        );
    }

    #[test]
    fn quote_sugar_expands_to_quote_form() {
        let data = read_all("'x '()").expect("valid input");

        assert_eq!(data[0], Syntax::List(vec![sym("quote"), sym("x")]));
        assert_eq!(data[1], Syntax::List(vec![sym("quote"), Syntax::List(vec![])]));
    }

    #[test]
    fn reads_one_datum_at_a_time() {
        let tokens = tokenize("1 \"two\" #t 3/4").expect("valid input");
        let mut reader = Reader::new(&tokens);

        assert_eq!(reader.read().expect("datum"), Some(Syntax::Number(1)));
        assert_eq!(
            reader.read().expect("datum"),
            Some(Syntax::String("two".to_owned()))
        );
        assert_eq!(reader.read().expect("datum"), Some(Syntax::True));
        assert_eq!(
            reader.read().expect("datum"),
            Some(Syntax::Rational {
                numerator: 3,
                denominator: 4
            })
        );
        assert_eq!(reader.read().expect("end"), None);
    }

    #[test]
    fn unfinished_input_is_incomplete() {
        assert!(matches!(read_all("(1 2"), Err(SchemeError::Incomplete)));
        assert!(matches!(read_all("'"), Err(SchemeError::Incomplete)));
        assert!(matches!(read_all("(a (b c)"), Err(SchemeError::Incomplete)));
    }

    #[test]
    fn stray_close_paren_is_a_parse_error() {
        let err = read_all(")").expect_err("unbalanced");

        assert!(matches!(err, SchemeError::Parse { line: 1, .. }));
        assert!(err.to_string().contains("Unexpected ')'"));
    }

    #[test]
    fn prints_back_as_s_expression() {
        let data = read_all("(a \"s\" #t #f 1/2 (b))").expect("valid input");

        assert_eq!(data[0].to_string(), "(a \"s\" #t #f 1/2 (b))");
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_string(&Syntax::List(vec![sym("f"), Syntax::Number(1)]))
            .expect("serializable");

        assert_eq!(
            json,
            r#"{"kind":"List","value":[{"kind":"Symbol","value":"f"},{"kind":"Number","value":1}]}"#
        );
    }
}
