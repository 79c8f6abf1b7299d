//! Answer extraction from evaluation responses

use lexqa_domain::Choice;

const ANSWER_PREFIXES: [&str; 2] = ["respuesta:", "answer:"];

/// Read the predicted letter from a model response
///
/// The first line that starts with `Respuesta:` or `Answer:` (any case,
/// leading markdown emphasis allowed) is the answer line. The first
/// character after the colon, past whitespace and emphasis markers, is the
/// prediction when it is `a` to `d`. Anything else gives `None`.
///
/// # Examples
///
/// ```
/// use lexqa_domain::Choice;
/// use lexqa_eval::parse_predicted_answer;
///
/// let response = "Razonamiento: el artículo 14 lo establece.\nRespuesta: c";
/// assert_eq!(parse_predicted_answer(response), Some(Choice::C));
/// assert_eq!(parse_predicted_answer("No lo sé"), None);
/// ```
pub fn parse_predicted_answer(response: &str) -> Option<Choice> {
    let rest = response.lines().find_map(answer_line)?;
    let letter = rest
        .trim_start_matches(|c: char| c.is_whitespace() || is_emphasis(c))
        .chars()
        .next()?;
    Choice::from_char(letter)
}

fn answer_line(line: &str) -> Option<String> {
    let lowered = line.trim().to_lowercase();
    let unmarked = lowered.trim_start_matches(is_emphasis);
    ANSWER_PREFIXES
        .iter()
        .find_map(|prefix| unmarked.strip_prefix(prefix))
        .map(str::to_string)
}

fn is_emphasis(c: char) -> bool {
    c == '*' || c == '_'
}
