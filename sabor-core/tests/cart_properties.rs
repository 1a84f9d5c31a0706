//! Cart invariants under arbitrary operation sequences

use proptest::prelude::*;
use sabor_core::CartStore;
use shared::{Category, DishRecord, Money};

#[derive(Debug, Clone)]
enum Op {
    Add(i64, Category),
    Remove(i64, Category),
    Adjust(i64, Category, i32),
    Clear,
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (1i64..5, category()).prop_map(|(id, c)| Op::Add(id, c)),
        2 => (1i64..5, category()).prop_map(|(id, c)| Op::Remove(id, c)),
        3 => (1i64..5, category(), -4i32..5).prop_map(|(id, c, d)| Op::Adjust(id, c, d)),
        1 => Just(Op::Clear),
    ]
}

/// Price depends on (id, category) so lines are distinguishable
fn dish(id: i64, category: Category) -> DishRecord {
    let offset = Category::ALL.iter().position(|c| *c == category).unwrap_or(0) as i64;
    DishRecord {
        id,
        name: format!("{category}-{id}"),
        description: String::new(),
        price: Money::from_cents(id * 1000 + offset * 10 + 5),
        image: None,
    }
}

fn apply(cart: &mut CartStore, op: &Op) {
    match *op {
        Op::Add(id, c) => {
            cart.add_item(&dish(id, c), c);
        }
        Op::Remove(id, c) => {
            cart.remove_item(id, c);
        }
        Op::Adjust(id, c, d) => {
            cart.adjust_quantity(id, c, d);
        }
        Op::Clear => cart.clear(),
    }
}

proptest! {
    #[test]
    fn prop_cart_invariants(ops in prop::collection::vec(op(), 0..60)) {
        let mut cart = CartStore::new();
        for op in &ops {
            apply(&mut cart, op);

            // no line at quantity 0
            prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));

            // no duplicate (id, category)
            let mut keys: Vec<_> = cart.lines().iter().map(|l| (l.dish_id, l.category)).collect();
            keys.sort_by_key(|(id, c)| (*id, c.as_str()));
            keys.dedup();
            prop_assert_eq!(keys.len(), cart.len());

            // total matches a manual recomputation to the cent
            let manual: i64 = cart
                .lines()
                .iter()
                .map(|l| l.price.cents() * i64::from(l.quantity))
                .sum();
            prop_assert_eq!(cart.total_money(), Money::from_cents(manual));
        }
    }

    #[test]
    fn prop_total_independent_of_insertion_order(
        adds in prop::collection::vec((1i64..5, category()), 0..30)
    ) {
        let mut forward = CartStore::new();
        for (id, c) in &adds {
            forward.add_item(&dish(*id, *c), *c);
        }
        let mut backward = CartStore::new();
        for (id, c) in adds.iter().rev() {
            backward.add_item(&dish(*id, *c), *c);
        }
        prop_assert_eq!(forward.total(), backward.total());
        prop_assert_eq!(forward.item_count(), backward.item_count());
    }
}

#[test]
fn test_total_example() {
    let mut cart = CartStore::new();
    let bruschetta = DishRecord {
        id: 1,
        name: "Bruschetta Tradicional".into(),
        description: String::new(),
        price: Money::parse("R$ 18,90").unwrap(),
        image: None,
    };
    let file = DishRecord {
        id: 1,
        name: "Filé Mignon".into(),
        description: String::new(),
        price: Money::parse("R$ 62,90").unwrap(),
        image: None,
    };
    cart.add_item(&bruschetta, Category::Entradas);
    cart.add_item(&bruschetta, Category::Entradas);
    cart.add_item(&file, Category::PratosPrincipais);
    assert_eq!(cart.total(), "100,70");
}
