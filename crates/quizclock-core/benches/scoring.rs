use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizclock_core::model::{Difficulty, Question, QuestionKind};
use quizclock_core::scoring::{outcomes, score};
use quizclock_core::text::decode_entities;

fn make_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            category: "Bench".into(),
            kind: QuestionKind::Multiple,
            difficulty: Difficulty::Medium,
            question: format!("Which of these is &quot;answer {i}&quot;?"),
            correct_answer: format!("answer {i}"),
            incorrect_answers: vec!["a".into(), "b".into(), "c".into()],
        })
        .collect()
}

fn make_answers(n: usize) -> BTreeMap<usize, String> {
    (0..n)
        .filter(|i| i % 3 != 0)
        .map(|i| {
            let answer = if i % 2 == 0 {
                format!("answer {i}")
            } else {
                "a".to_string()
            };
            (i, answer)
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for n in [15, 150, 1500] {
        let questions = make_questions(n);
        let answers = make_answers(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| score(black_box(&questions), black_box(&answers)))
        });
    }

    group.finish();
}

fn bench_outcomes(c: &mut Criterion) {
    let questions = make_questions(15);
    let answers = make_answers(15);
    c.bench_function("outcomes/n=15", |b| {
        b.iter(|| outcomes(black_box(&questions), black_box(&answers)))
    });
}

fn bench_decode(c: &mut Criterion) {
    let text = "Who composed &quot;Cl&eacute;ment&#039;s Suite&quot; &amp; why?";
    c.bench_function("decode_entities", |b| {
        b.iter(|| decode_entities(black_box(text)))
    });
}

criterion_group!(benches, bench_score, bench_outcomes, bench_decode);
criterion_main!(benches);
