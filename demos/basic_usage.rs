//! Basic usage example for veb-set.
//!
//! Walks through the van Emde Boas set and the splay-tree companion.

use veb_set::{SplayTreeSet, VebSet};

fn main() {
    println!("=== veb-set - Basic Usage Example ===\n");

    // Create a set over the 16-bit universe [0, 65536)
    let mut set = VebSet::new(16);
    println!("Created empty set over [0, 2^{})", set.num_bits());

    // Insert some values
    println!("\nInserting values: 100, 200, 150, 300");
    for x in [100, 200, 150, 300] {
        set.insert(x).unwrap();
    }
    println!("Set now contains {} values", set.len());

    // Check membership
    println!("\nMembership checks:");
    println!("  contains(150): {}", set.contains(150).unwrap());
    println!("  contains(999): {}", set.contains(999).unwrap());

    // Get min/max (O(1))
    println!("\nMin/Max (O(1)):");
    println!("  min: {:?}", set.min());
    println!("  max: {:?}", set.max());

    // Values outside the universe are rejected, not silently dropped
    println!("\nUniverse boundary:");
    println!("  insert(70000): {:?}", set.insert(70_000));

    // Remove values
    println!("\nRemoving value 150:");
    set.remove(150).unwrap();
    println!("  contains(150): {}", set.contains(150).unwrap());
    println!("  len: {}", set.len());

    // Removing the minimum promotes the next element in O(log log U)
    println!("\nRemoving the minimum:");
    set.remove(100).unwrap();
    println!("  new min: {:?}", set.min());

    // The splay-tree companion takes any ordered key type
    println!("\n=== SplayTreeSet Companion ===\n");
    let mut names = SplayTreeSet::new();
    for name in ["carol", "alice", "bob"] {
        names.insert(name);
    }
    println!("Inserted 3 names, len = {}", names.len());
    println!("  contains(\"alice\"): {}", names.contains(&"alice"));
    println!("  remove(\"carol\"): {}", names.remove(&"carol"));
    println!("  len: {}", names.len());

    println!("\n=== Example Complete ===");
}
