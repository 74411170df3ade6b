//! Heuristic dependency attachment
//!
//! One root per sentence (first verb, else first auxiliary, else first
//! nominal). Every other token attaches by local rules to a neighbour or to
//! the root, using ClearNLP-style relation labels.

use super::tagger::PosGuess;
use crate::types::Upos;

/// (head index within the sentence, relation) for every token
pub fn attach(guesses: &[PosGuess]) -> Vec<(usize, &'static str)> {
    let root = find_root(guesses);
    let mut arcs = Vec::with_capacity(guesses.len());
    let mut object_taken = false;

    for (i, guess) in guesses.iter().enumerate() {
        if i == root {
            arcs.push((root, "ROOT"));
            continue;
        }

        let arc = if guess.pos == Upos::Punct {
            (root, "punct")
        } else if let Some(first) = conjunct_of(guesses, i) {
            (first, "conj")
        } else {
            match guess.pos {
                Upos::Det => (next_noun(guesses, i).unwrap_or(root), "det"),
                Upos::Pron if guess.tag == "PRP$" => (next_noun(guesses, i).unwrap_or(root), "poss"),
                Upos::Adj => match next_noun(guesses, i) {
                    Some(noun) => (noun, "amod"),
                    None => (root, "acomp"),
                },
                Upos::Num => (next_noun(guesses, i).unwrap_or(root), "nummod"),
                Upos::Adv => match guesses.get(i + 1) {
                    Some(next) if matches!(next.pos, Upos::Adj | Upos::Adv) => (i + 1, "advmod"),
                    _ => (root, "advmod"),
                },
                Upos::Part => match guess.tag {
                    "TO" => (next_of(guesses, i, Upos::Verb).unwrap_or(root), "aux"),
                    "POS" => (i.saturating_sub(1), "case"),
                    _ => (root, "neg"),
                },
                Upos::Aux => match next_of(guesses, i, Upos::Verb) {
                    Some(verb) if guesses[verb].tag == "VBN" && guess.tag != "VBP" => {
                        (verb, "auxpass")
                    }
                    Some(verb) => (verb, "aux"),
                    None => (root, "aux"),
                },
                Upos::Cconj => (previous_content(guesses, i).unwrap_or(root), "cc"),
                Upos::Sconj => (root, "mark"),
                Upos::Intj => (root, "intj"),
                Upos::Adp => match i.checked_sub(1) {
                    Some(prev) if guesses[prev].pos.is_nominal() => (prev, "prep"),
                    _ => (root, "prep"),
                },
                Upos::Noun | Upos::Propn | Upos::Pron => {
                    nominal_arc(guesses, i, root, &mut object_taken)
                }
                Upos::Verb => verb_arc(guesses, i, root),
                _ => (root, "dep"),
            }
        };

        arcs.push(arc);
    }

    arcs
}

fn find_root(guesses: &[PosGuess]) -> usize {
    let first = |pred: &dyn Fn(&PosGuess) -> bool| guesses.iter().position(pred);

    first(&|g| g.pos == Upos::Verb)
        .or_else(|| first(&|g| g.pos == Upos::Aux))
        .or_else(|| first(&|g| g.pos.is_nominal()))
        .or_else(|| first(&|g| g.pos != Upos::Punct))
        .unwrap_or(0)
}

fn nominal_arc(
    guesses: &[PosGuess],
    i: usize,
    root: usize,
    object_taken: &mut bool,
) -> (usize, &'static str) {
    let current = guesses[i];
    let next = guesses.get(i + 1);

    // "coffee cup": the first noun modifies the second
    if matches!(current.pos, Upos::Noun | Upos::Propn)
        && next.is_some_and(|n| matches!(n.pos, Upos::Noun | Upos::Propn))
    {
        return (i + 1, "compound");
    }

    // "John 's book"
    if next.is_some_and(|n| n.tag == "POS") {
        if let Some(owned) = next_noun(guesses, i + 1) {
            return (owned, "poss");
        }
    }

    if let Some(governor) = governing_preposition(guesses, i) {
        return (governor, "pobj");
    }

    if i < root {
        return (root, "nsubj");
    }

    if !*object_taken {
        *object_taken = true;
        let relation = if guesses[root].pos == Upos::Aux {
            "attr"
        } else {
            "dobj"
        };
        return (root, relation);
    }

    (root, "npadvmod")
}

fn verb_arc(guesses: &[PosGuess], i: usize, root: usize) -> (usize, &'static str) {
    let prev = i.checked_sub(1).map(|p| guesses[p]);

    match prev {
        Some(p) if p.pos == Upos::Part && p.tag == "TO" => (root, "xcomp"),
        Some(p) if matches!(p.pos, Upos::Noun | Upos::Propn) && matches!(guesses[i].tag, "VBG" | "VBN") => {
            (i - 1, "acl")
        }
        _ => (root, "ccomp"),
    }
}

/// Head noun of the phrase starting after `i`: skips modifiers, stops at
/// anything that cannot sit inside a noun phrase
fn next_noun(guesses: &[PosGuess], i: usize) -> Option<usize> {
    let mut found = None;
    for (j, g) in guesses.iter().enumerate().skip(i + 1) {
        match g.pos {
            Upos::Noun | Upos::Propn => {
                found = Some(j);
                // keep going through compounds to the last noun
                if guesses
                    .get(j + 1)
                    .is_some_and(|n| matches!(n.pos, Upos::Noun | Upos::Propn))
                {
                    continue;
                }
                break;
            }
            Upos::Adj | Upos::Adv | Upos::Num | Upos::Det => continue,
            Upos::Part if g.tag == "POS" => continue,
            Upos::Pron if g.tag == "PRP$" => continue,
            _ => break,
        }
    }
    found
}

fn next_of(guesses: &[PosGuess], i: usize, pos: Upos) -> Option<usize> {
    guesses
        .iter()
        .enumerate()
        .skip(i + 1)
        .take_while(|(_, g)| g.pos != Upos::Punct)
        .find(|(_, g)| g.pos == pos)
        .map(|(j, _)| j)
}

fn previous_content(guesses: &[PosGuess], i: usize) -> Option<usize> {
    (0..i).rev().find(|&j| guesses[j].pos != Upos::Punct)
}

/// For `X and Y`, the index of X when `i` is Y
fn conjunct_of(guesses: &[PosGuess], i: usize) -> Option<usize> {
    let cc = i.checked_sub(1)?;
    if guesses[cc].pos != Upos::Cconj {
        return None;
    }
    let first = previous_content(guesses, cc)?;
    (guesses[first].pos == guesses[i].pos).then_some(first)
}

/// Preposition governing the noun phrase that `i` heads
fn governing_preposition(guesses: &[PosGuess], i: usize) -> Option<usize> {
    for j in (0..i).rev() {
        let g = guesses[j];
        match g.pos {
            Upos::Adp => return Some(j),
            Upos::Det | Upos::Adj | Upos::Num | Upos::Adv => continue,
            Upos::Pron if g.tag == "PRP$" => continue,
            _ => return None,
        }
    }
    None
}
