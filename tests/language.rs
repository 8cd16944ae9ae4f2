use lumen::{error::Error, run_program};

fn assert_value(src: &str, expected: &str) {
    match run_program(src) {
        Ok(rendered) => assert_eq!(rendered, expected, "Program: {src}"),
        Err(e) => panic!("Script failed: {e}\nProgram: {src}"),
    }
}

fn assert_lex_error(src: &str) {
    match run_program(src) {
        Ok(v) => panic!("Script produced {v} but was expected to fail lexing"),
        Err(Error::Lex(_)) => {},
        Err(e) => panic!("Expected a lex error, got: {e}"),
    }
}

fn assert_parse_error(src: &str) {
    match run_program(src) {
        Ok(v) => panic!("Script produced {v} but was expected to fail parsing"),
        Err(Error::Parse(_)) => {},
        Err(e) => panic!("Expected a parse error, got: {e}"),
    }
}

fn assert_type_error(src: &str) {
    match run_program(src) {
        Ok(v) => panic!("Script produced {v} but was expected to fail checking"),
        Err(Error::Type(_)) => {},
        Err(e) => panic!("Expected a type error, got: {e}"),
    }
}

fn assert_runtime_error(src: &str) {
    match run_program(src) {
        Ok(v) => panic!("Script produced {v} but was expected to fail at runtime"),
        Err(Error::Runtime(_)) => {},
        Err(e) => panic!("Expected a runtime error, got: {e}"),
    }
}

#[test]
fn literals_and_arithmetic() {
    assert_value("1 + 2 * 3", "7");
    assert_value("(1 + 2) * 3", "9");
    assert_value("10 - 2 - 3", "5");
    assert_value("7 / 2", "3");
    assert_value("7 mod 2", "1");
    assert_value("-7 mod 2", "-1");
    assert_value("()", "()");
    assert_value("true", "true");
    assert_value("\"hello\"", "\"hello\"");
}

#[test]
fn comparisons_and_logic() {
    assert_value("1 < 2", "true");
    assert_value("2 <= 2", "true");
    assert_value("3 != 4", "true");
    assert_value("1 == 2", "false");
    assert_value("if 1 = 1 then 2 else 3", "2");
    assert_value("true && false", "false");
    assert_value("true || false", "true");
    assert_value("!false", "true");
    assert_value("\"abc\" < \"abd\"", "true");
    assert_value("false == false", "true");
}

#[test]
fn recursion() {
    assert_value(
                 "let rec factorial (n:int):int = if n <= 1 then 1 else n * factorial (n-1) in \
                  factorial 5",
                 "120",
    );
    assert_value(
                 "let rec fib (n:int):int = if n <= 1 then n else fib (n-1) + fib (n-2) in fib 10",
                 "55",
    );
}

#[test]
fn records_and_field_update() {
    assert_value(
                 "type point = { mutable x:int; mutable y:int } in let p = {x=10; y=20} in let s \
                  = p.x + p.y in p.x <- 15; p.x + p.y",
                 "35",
    );
    assert_value(
                 "type point = { mutable x:int; mutable y:int } in {x=1; y=2}",
                 "{x=1; y=2}",
    );
}

#[test]
fn arrays_and_element_update() {
    assert_value(
                 "let arr = [1;2;3;4;5] in let s = arr.(0)+arr.(1)+arr.(2) in arr.(0) <- 10; \
                  arr.(0) + s",
                 "16",
    );
    assert_value("[1; 2; 3]", "[|1; 2; 3|]");
    assert_value("[]", "[||]");
    assert_value("[[1]; [2; 3]].(1).(0)", "2");
}

#[test]
fn while_loops_and_mutable_lets() {
    assert_value(
                 "let x = 0 in let s = 0 in while x < 10 do s <- s + x; x <- x + 1 done; s",
                 "45",
    );
    assert_value("while false do () done", "()");
}

#[test]
fn higher_order_functions() {
    assert_value(
                 "let apply (f:int->int) (x:int):int = f x in let double (n:int):int = n * 2 in \
                  apply double 5",
                 "10",
    );
    assert_value(
                 "let add (a:int) (b:int) : int = a + b in let inc = add 1 in inc 41",
                 "42",
    );
    assert_value("(fun (n:int) : int = n * n) 6", "36");
    assert_value("let f (n:int) : int = n in f", "<fun>");
}

#[test]
fn short_circuit_evaluation() {
    // The right operands would divide by zero if evaluated.
    assert_value("false && 1/0 == 0", "false");
    assert_value("true || 1/0 == 0", "true");
    assert_value("if true then 1 else 1/0", "1");
}

#[test]
fn evaluation_order_is_left_to_right() {
    assert_value(
                 "let t = 0 in let arr = [(t <- t + 1; t); (t <- t * 10; t)] in arr.(0) + \
                  arr.(1)",
                 "11",
    );
}

#[test]
fn aliases_observe_mutation() {
    assert_value(
                 "type point = { mutable x:int; mutable y:int } in let p = {x=1; y=2} in let q = \
                  p in p.x <- 42; q.x",
                 "42",
    );
    assert_value("let a = [1; 2] in let b = a in a.(0) <- 9; b.(0)", "9");
}

#[test]
fn closures_observe_cell_updates() {
    assert_value(
                 "let c = 0 in let get = fun (u:unit) : int = c in c <- 5; get ()",
                 "5",
    );
}

#[test]
fn let_bindings_and_shadowing() {
    assert_value("let x = 1 in let x = x + 1 in x", "2");
    assert_value("let x : int = 5 in x", "5");
    assert_value("let u = () in u", "()");
}

#[test]
fn nested_comments_and_strings() {
    assert_value("(* outer (* inner *) still outer *) 42", "42");
    assert_value("\"a\\nb\"", "\"a\\nb\"");
    assert_value("(* spans\nlines *) 1", "1");
}

#[test]
fn ill_typed_programs_are_rejected() {
    assert_type_error("1 + true");
    assert_type_error("let f = 1 in f 2");
    assert_type_error("[1; true]");
    assert_type_error("type point = { mutable x:int; mutable y:int } in {x=1}.y");
    assert_type_error("1; 2");
    assert_type_error("if 1 then 2 else 3");
    assert_type_error("if true then 1 else false");
    assert_type_error("let x : bool = 5 in x");
    assert_type_error("let id (x:int) : int = x in let a = id 1 in id true");
    assert_type_error("let f (x:int) : unit = x <- 1 in f 1");
    assert_type_error("let x = 1 in y");
    assert_type_error("type point = { mutable x:int; mutable y:int } in let p = {x=1; y=2} in p \
                       == p");
    assert_type_error("type point = { x:int } in let p = {x=1} in p.x <- 2");
    assert_type_error("type point = { x:int } in type point = { x:int } in 1");
    assert_type_error("type point = { x:int; x:bool } in 1");
    assert_type_error("while 1 do () done");
}

#[test]
fn runtime_failures() {
    assert_runtime_error("1/0");
    assert_runtime_error("10 mod 0");
    assert_runtime_error("[1;2;3].(5)");
    assert_runtime_error("[1;2;3].(-1)");
    assert_runtime_error("let a = [] in a.(0)");
}

#[test]
fn parse_errors_are_reported() {
    assert_parse_error("(1 + 2");
    assert_parse_error("let 5 = 3 in 5");
    assert_parse_error("1 + 2 )");
    assert_parse_error("let x = 1 in x <- 2 <- 3");
    assert_parse_error("if true then 1");
    assert_parse_error("let rec x = 5 in x");
}

#[test]
fn lex_errors_are_reported() {
    assert_lex_error("(* never closed");
    assert_lex_error("\"never closed");
    assert_lex_error("1 ? 2");
    assert_lex_error("99999999999999999999");
}

#[test]
fn parenthesization_is_transparent() {
    assert_value("1 + 2 * 3", "7");
    assert_value("1 + (2 * 3)", "7");
    assert_value("((1)) + (((2 * 3)))", "7");
}
