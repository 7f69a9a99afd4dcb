use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use quizadmin_core::account;
use quizadmin_core::validation::{is_valid_email, validate_person_name};
use quizadmin_core::{NameField, Store};

fn populated_store(users: usize) -> Store {
    let mut store = Store::new();
    for i in 0..users {
        account::register(
            &mut store,
            &format!("user{i}@example.com"),
            "abcd1234",
            "Bench",
            "User",
        )
        .expect("bench registration");
    }
    store
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    group.bench_function("email_valid", |b| {
        b.iter(|| is_valid_email(black_box("first.last+tag@mail.example.org")))
    });

    group.bench_function("email_invalid", |b| {
        b.iter(|| is_valid_email(black_box("test1@hotpotdot..com")))
    });

    group.bench_function("person_name", |b| {
        b.iter(|| validate_person_name(black_box("Mary-Jane O'Neil"), NameField::First))
    });

    group.finish();
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register");

    for size in [10usize, 1_000] {
        group.bench_function(format!("into_{size}_users"), |b| {
            b.iter_batched(
                || populated_store(size),
                |mut store| {
                    account::register(
                        black_box(&mut store),
                        "fresh@example.com",
                        "abcd1234",
                        "Fresh",
                        "User",
                    )
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_login(c: &mut Criterion) {
    let mut group = c.benchmark_group("login");
    let mut store = populated_store(1_000);

    group.bench_function("last_of_1000", |b| {
        b.iter(|| account::login(&mut store, black_box("user999@example.com"), "abcd1234"))
    });

    group.finish();
}

criterion_group!(benches, bench_validation, bench_register, bench_login);
criterion_main!(benches);
