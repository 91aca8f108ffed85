#[cfg(test)]
mod evaluator_tests {
    use scheme_interpreter as scheme;

    use scheme::error::{Result, SchemeError};
    use scheme::reader::{tokenize, Reader};
    use scheme::repl::Repl;
    use scheme::value::Value;

    /// Evaluates every datum in `source` against one global environment and
    /// returns the value of the last one.
    fn eval(source: &str) -> Result<Value> {
        let tokens = tokenize(source)?;
        let data = Reader::new(&tokens).read_all()?;
        let mut repl = Repl::new(Vec::new());

        let mut last = Value::Void;
        for datum in &data {
            last = repl.eval(datum)?;
        }

        Ok(last)
    }

    fn show(source: &str) -> String {
        match eval(source) {
            Ok(value) => value.to_string(),
            Err(e) => panic!("{} failed: {}", source, e),
        }
    }

    fn assert_runtime_error(source: &str) {
        match eval(source) {
            Err(SchemeError::Runtime(_)) => {}
            other => panic!("expected a runtime error from {}, got {:?}", source, other),
        }
    }

    #[test]
    fn arithmetic_end_to_end() {
        assert_eq!(show("(+ 1 2)"), "3");
        assert_eq!(show("(* 2 (+ 1 1))"), "4");
        assert_eq!(show("(/ 1 3)"), "1/3");
        assert_eq!(show("(/ 6 3)"), "2");
        assert_eq!(show("(/ 1 -3)"), "1/-3");
        assert_eq!(show("(+ 1/2 1/2)"), "4/4");
        assert_eq!(show("(+ 1 2 3 4)"), "10");
        assert_eq!(show("(- 5)"), "-5");
        assert_eq!(show("(/ 1)"), "1/1");
        assert_eq!(show("(/ -1)"), "1/-1");
        assert_eq!(show("(+)"), "0");
        assert_eq!(show("(*)"), "1");
        assert_eq!(show("(modulo 17 5)"), "2");
        assert_eq!(show("(expt 3 4)"), "81");
    }

    #[test]
    fn comparisons_in_both_arities() {
        assert_eq!(show("(< 1 2)"), "#t");
        assert_eq!(show("(< 1 2 3)"), "#t");
        assert_eq!(show("(< 1 3 2)"), "#f");
        assert_eq!(show("(= 1/2 2/4)"), "#t");
        assert_eq!(show("(>= 3 3 1)"), "#t");
        assert_runtime_error("(< 1)");
        assert_runtime_error("(< 1 'a)");
    }

    #[test]
    fn let_and_define() {
        assert_eq!(show("(let ((x 5)) (* x x))"), "25");
        assert_eq!(show("(define x 1) (let ((x 2) (y x)) y)"), "1");
        assert_eq!(show("(define x 1) (define x 2) x"), "2");
        assert_eq!(show("(define y 3)"), "#<void>");
    }

    #[test]
    fn recursive_procedures() {
        let source = "
            (define (fact n)
              (if (= n 0) 1 (* n (fact (- n 1)))))
            (fact 5)";

        assert_eq!(show(source), "120");
    }

    #[test]
    fn closures_capture_their_defining_scope() {
        let source = "
            (define x 1)
            (define f (let ((x 2)) (lambda () x)))
            (f)";

        assert_eq!(show(source), "2");

        let counter = "
            (define make-counter
              (lambda ()
                (let ((n 0))
                  (lambda () (begin (set! n (+ n 1)) n)))))
            (define c (make-counter))
            (c)
            (c)
            (c)";

        assert_eq!(show(counter), "3");
    }

    #[test]
    fn letrec_supports_mutual_recursion() {
        let source = "
            (letrec ((ev? (lambda (n) (if (= n 0) #t (od? (- n 1)))))
                     (od? (lambda (n) (if (= n 0) #f (ev? (- n 1))))))
              (ev? 10))";

        assert_eq!(show(source), "#t");
    }

    #[test]
    fn letrec_placeholder_reads_as_empty_list() {
        assert_eq!(show("(letrec ((a b) (b 1)) a)"), "()");
    }

    #[test]
    fn pairs_and_lists() {
        assert_eq!(show("(cons 1 (cons 2 '()))"), "(1 2)");
        assert_eq!(show("(cons 1 2)"), "(1 . 2)");
        assert_eq!(show("(cons 1 (cons 2 3))"), "(1 2 . 3)");
        assert_eq!(show("(list 1 \"a\" 'b)"), "(1 \"a\" b)");
        assert_eq!(show("(list)"), "()");
        assert_eq!(show("(car (cdr '(1 2 3)))"), "2");
        assert_runtime_error("(car 1)");
        assert_runtime_error("(cdr '())");
    }

    #[test]
    fn mutation_is_visible_through_every_reference() {
        let source = "
            (define l (list 1 2))
            (define m l)
            (set-car! m 5)
            (set-cdr! (cdr m) '(3))
            l";

        assert_eq!(show(source), "(5 2 3)");
    }

    #[test]
    fn eq_compares_identity_for_compound_values() {
        assert_eq!(show("(eq? 3 3)"), "#t");
        assert_eq!(show("(eq? 'a 'a)"), "#t");
        assert_eq!(show("(eq? #t #t)"), "#t");
        assert_eq!(show("(eq? '() '())"), "#t");
        assert_eq!(show("(eq? (cons 1 2) (cons 1 2))"), "#f");
        assert_eq!(show("(define p (cons 1 2)) (eq? p p)"), "#t");
        assert_eq!(show("(eq? \"a\" \"a\")"), "#f");
        assert_eq!(show("(define s \"a\") (eq? s s)"), "#t");
        assert_eq!(show("(eq? 1/2 1/2)"), "#f");
        assert_eq!(show("(define r 1/2) (eq? r r)"), "#t");
        assert_eq!(show("(let ((x 1/2)) (eq? x x))"), "#t");
        assert_eq!(show("(define r 1/2) (define q r) (eq? r q)"), "#t");
        assert_eq!(show("(eq? (/ 1 2) (/ 1 2))"), "#f");
        assert_eq!(show("(define f (lambda (x) x)) (eq? f f)"), "#t");
    }

    #[test]
    fn type_predicates() {
        assert_eq!(show("(number? 1)"), "#t");
        assert_eq!(show("(number? 1/2)"), "#f");
        assert_eq!(show("(boolean? #f)"), "#t");
        assert_eq!(show("(null? '())"), "#t");
        assert_eq!(show("(pair? '())"), "#f");
        assert_eq!(show("(procedure? (lambda (x) x))"), "#t");
        assert_eq!(show("(symbol? 'a)"), "#t");
        assert_eq!(show("(string? \"a\")"), "#t");
        assert_eq!(show("(list? '(1 2))"), "#t");
        assert_eq!(show("(list? '())"), "#t");
        assert_eq!(show("(list? (cons 1 2))"), "#f");
        assert_eq!(show("(list? 5)"), "#f");
    }

    #[test]
    fn only_false_is_falsy() {
        assert_eq!(show("(if 0 'yes 'no)"), "yes");
        assert_eq!(show("(if '() 'yes 'no)"), "yes");
        assert_eq!(show("(if #f 'yes 'no)"), "no");
        assert_eq!(show("(not 0)"), "#f");
        assert_eq!(show("(not #f)"), "#t");
    }

    #[test]
    fn and_or_short_circuit() {
        assert_eq!(show("(and)"), "#t");
        assert_eq!(show("(or)"), "#f");
        assert_eq!(show("(and 1 2)"), "2");
        assert_eq!(show("(and 1 #f 2)"), "#f");
        assert_eq!(show("(or #f 3)"), "3");
        assert_eq!(show("(and #f (car 1))"), "#f");
        assert_eq!(show("(or 1 (car 1))"), "1");
    }

    #[test]
    fn cond_clauses() {
        assert_eq!(show("(cond (#f 1) ((= 1 1) 2))"), "2");
        assert_eq!(show("(cond ((+ 1 2)))"), "3");
        assert_eq!(show("(cond (#f 1))"), "#<void>");
        assert_eq!(show("(cond (#t 1 2 3))"), "3");
        assert_runtime_error("(cond (else 1))");
        assert_eq!(show("(define else #t) (cond (#f 1) (else 2))"), "2");
    }

    #[test]
    fn begin_sequences() {
        assert_eq!(show("(begin)"), "#<void>");
        assert_eq!(show("(begin 1 2)"), "2");
    }

    #[test]
    fn quote_returns_data_unevaluated() {
        assert_eq!(show("(quote (1 2 (3 4)))"), "(1 2 (3 4))");
        assert_eq!(show("'sym"), "sym");
        assert_eq!(show("'\"s\""), "\"s\"");
        assert_eq!(show("'(+ 1 2)"), "(+ 1 2)");
    }

    #[test]
    fn set_updates_nearest_binding() {
        assert_eq!(show("(define x 1) (set! x 2) x"), "2");
        assert_eq!(
            show("(define x 1) (define (f) (set! x 10)) (f) x"),
            "10"
        );
        assert_runtime_error("(set! nope 1)");
    }

    #[test]
    fn user_bindings_shadow_primitives() {
        assert_eq!(show("(define car (lambda (x) 42)) (car 1)"), "42");
        assert_eq!(show("(define (list a) a) (list 7)"), "7");
    }

    #[test]
    fn procedures_render_opaquely() {
        assert_eq!(show("(lambda (x) x)"), "#<procedure>");
        assert_eq!(show("(void)"), "#<void>");
        assert_eq!(show("(exit)"), "#<terminate>");
    }

    #[test]
    fn runtime_errors() {
        assert_runtime_error("y");
        assert_runtime_error("(define f car)");
        assert_runtime_error("(1 2)");
        assert_runtime_error("(define (g a) a) (g 1 2)");
        assert_runtime_error("(/ 1 0)");
        assert_runtime_error("(expt 2 -1)");
        assert_runtime_error("(expt 0 0)");
        assert_runtime_error("(+ 9223372036854775807 1)");
        assert_runtime_error("(+ 1 \"a\")");
        assert_runtime_error("(set-car! 1 2)");
    }

    #[test]
    fn malformed_special_forms_are_rejected() {
        assert_runtime_error("(car 1 2)");
        assert_runtime_error("(if 1 2)");
        assert_runtime_error("(lambda x x)");
        assert_runtime_error("(let ((x)) x)");
        assert_runtime_error("(let ((1 2)) 1)");
        assert_runtime_error("(void 1)");
        assert_runtime_error("(cons 1)");
        assert_runtime_error("(quote)");
        assert_runtime_error("(cond 1)");
    }

    #[test]
    fn display_writes_strings_raw() {
        let tokens = tokenize("(display \"hi\") (display '(1 \"a\"))").expect("valid input");
        let data = Reader::new(&tokens).read_all().expect("valid input");
        let mut repl = Repl::new(Vec::new());

        for datum in &data {
            let value = repl.eval(datum).expect("display succeeds");
            assert!(matches!(value, Value::Void));
        }

        let out = String::from_utf8(repl.into_output()).expect("utf-8 output");
        assert_eq!(out, "hi(1 \"a\")");
    }
}
