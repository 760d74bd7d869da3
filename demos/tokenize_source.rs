//! Tokenize a Toy source string and print every token.

use toy_lexer::{TokenValue, tokenize};

fn main() {
    let input = "\
# Transpose and multiply.
def multiply_transpose(a, b) {
  return transpose(a) * transpose(b);
}

def main() {
  var a = [[1, 2, 3], [4, 5, 6]];
  print(multiply_transpose(a, a));
}
";

    for token in tokenize(input, "demo.toy") {
        match token.value {
            TokenValue::None => println!("{}  {}", token.location, token.token),
            value => println!("{}  {}  {value}", token.location, token.token),
        }
    }
}
