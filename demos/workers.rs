//! Two workers share one set. The first blocks on a value only the second
//! inserts; both hammer the set with duplicates along the way.

use std::io;
use std::sync::Arc;
use std::thread;

use coupled_set::linked_list::concurrent::{prelude::*, StringSet};

fn worker_a(list: &StringSet) {
    list.insert("a");
    list.insert("a");
    list.insert("b");
    list.wait_for("y");
    println!("Blocked find on y completed");
    println!("b exists? {}", list.find("b", true));

    list.insert("b");
    list.insert("b");
    list.insert("z");
}

fn worker_b(list: &StringSet) {
    list.insert("m");
    list.insert("c");
    println!("q exists? {}", list.find("q", false));
    list.insert("y");
    list.insert("m");
}

fn main() -> io::Result<()> {
    let list = Arc::new(StringSet::new());

    let workers = [("WorkerA", worker_a as fn(&StringSet)), ("WorkerB", worker_b)]
        .into_iter()
        .map(|(name, work)| {
            let list = Arc::clone(&list);
            thread::Builder::new()
                .name(name.to_string())
                .spawn(move || work(&list))
        })
        .collect::<io::Result<Vec<_>>>()?;

    for worker in workers {
        if worker.join().is_err() {
            return Err(io::Error::other("worker panicked"));
        }
    }

    println!("\nFinal list:");
    print!("{list}");
    Ok(())
}
