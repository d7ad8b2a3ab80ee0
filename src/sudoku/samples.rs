#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Bundled example puzzles, one per supported size class.
//!
//! Each constant holds the grid rows exactly as they appear inside a batch
//! file block (without the `<N> <flag>` header). The `*_SOLUTION` constants
//! are the unique completions.

use crate::sudoku::alphabet::Alphabet;
use crate::sudoku::puzzle::{Puzzle, Variant};

pub const FOUR: &str = "\
0 4 0 1
1 3 0 0
0 0 1 0
3 0 4 0
";

pub const FOUR_SOLUTION: &str = "\
2 4 3 1
1 3 2 4
4 2 1 3
3 1 4 2
";

pub const NINE: &str = "\
5 3 0 0 7 0 0 0 0
6 0 0 1 9 5 0 0 0
0 9 8 0 0 0 0 6 0
8 0 0 0 6 0 0 0 3
4 0 0 8 0 3 0 0 1
7 0 0 0 2 0 0 0 6
0 6 0 0 0 0 2 8 0
0 0 0 4 1 9 0 0 5
0 0 0 0 8 0 0 7 9
";

pub const NINE_SOLUTION: &str = "\
5 3 4 6 7 8 9 1 2
6 7 2 1 9 5 3 4 8
1 9 8 3 4 2 5 6 7
8 5 9 7 6 1 4 2 3
4 2 6 8 5 3 7 9 1
7 1 3 9 2 4 8 5 6
9 6 1 5 3 7 2 8 4
2 8 7 4 1 9 6 3 5
3 4 5 2 8 6 1 7 9
";

/// A Sudoku X: unique only with the diagonal rule.
pub const NINE_DIAGONAL: &str = "\
3 0 9 0 0 4 0 0 0
0 0 0 7 0 0 3 0 0
2 0 0 0 0 8 0 0 9
5 0 0 0 0 0 1 7 0
0 0 8 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 3 0 0 0 0 2 0
1 0 0 0 0 0 0 0 0
0 0 0 9 0 0 0 5 7
";

pub const NINE_DIAGONAL_SOLUTION: &str = "\
3 7 9 2 6 4 5 1 8
8 6 5 7 9 1 3 4 2
2 4 1 3 5 8 7 6 9
5 3 2 8 4 9 1 7 6
4 1 8 6 2 7 9 3 5
7 9 6 1 3 5 2 8 4
9 8 3 5 7 6 4 2 1
1 5 7 4 8 2 6 9 3
6 2 4 9 1 3 8 5 7
";

/// Ranks 10 to 16 written as `A` to `G`.
pub const SIXTEEN: &str = "\
0 B 0 0 0 2 3 E 0 0 9 C 0 0 0 G
F C 0 0 0 B 0 1 D A 0 0 0 0 7 2
0 0 A 0 0 0 0 0 G B 0 1 6 4 C 3
0 G E 1 0 4 0 6 0 3 0 F 0 8 0 0
1 6 5 C 0 0 B 0 0 9 8 0 0 0 0 0
0 0 0 7 E 1 8 0 0 F 6 0 D 5 0 4
4 F 8 0 9 D 0 0 0 0 7 G 3 0 0 0
0 9 D 0 0 0 0 F A 0 0 0 7 6 0 B
E 0 6 B 0 0 0 C 7 0 0 0 0 3 D 0
0 0 0 5 8 E 0 0 0 0 D B 0 1 2 6
D 0 G 4 0 F 5 0 0 1 C 6 8 0 0 0
0 0 0 0 0 G A 0 0 8 0 0 B 9 4 5
0 0 B 0 1 0 E 0 5 0 3 0 F 7 G 0
5 D F 3 G 0 4 7 0 0 0 0 0 2 0 0
G 1 0 0 0 0 C 2 E 0 F 0 0 0 3 8
9 0 0 0 D 5 0 0 8 6 G 0 0 0 A 0
";

pub const SIXTEEN_SOLUTION: &str = "\
8 B 4 D A 2 3 E 6 7 9 C 1 F 5 G
F C 3 6 5 B G 1 D A 4 8 9 E 7 2
2 5 A 9 F 7 D 8 G B E 1 6 4 C 3
7 G E 1 C 4 9 6 2 3 5 F A 8 B D
1 6 5 C 7 3 B A 4 9 8 D 2 G F E
B A 2 7 E 1 8 G C F 6 3 D 5 9 4
4 F 8 E 9 D 6 5 B 2 7 G 3 C 1 A
3 9 D G 4 C 2 F A E 1 5 7 6 8 B
E 8 6 B 2 9 1 C 7 5 A 4 G 3 D F
A 3 9 5 8 E 7 4 F G D B C 1 2 6
D 2 G 4 3 F 5 B 9 1 C 6 8 A E 7
C 7 1 F 6 G A D 3 8 2 E B 9 4 5
6 4 B 8 1 A E 9 5 D 3 2 F 7 G C
5 D F 3 G 8 4 7 1 C B A E 2 6 9
G 1 7 A B 6 C 2 E 4 F 9 5 D 3 8
9 E C 2 D 5 F 3 8 6 G 7 4 B A 1
";

/// Ranks 10 to 25 written as `A` to `P`. Not unique.
pub const TWENTY_FIVE: &str = "\
O 0 0 0 0 B E 0 0 C P F 0 0 0 M J 0 0 0 L 0 0 0 D
0 E 6 0 0 P 0 H 0 K 0 0 0 2 G L 0 7 0 0 0 8 0 0 0
P F H N K M J 9 0 0 L A 7 0 0 0 0 I 0 5 0 E 0 4 0
0 J 0 2 G L 0 0 0 D O 0 0 3 0 0 0 0 0 C 0 F 0 N K
L A 7 1 0 0 8 I 3 5 0 E 6 0 C 0 F 0 0 K M 0 9 2 G
0 I 3 5 0 0 0 4 C 0 F H 0 0 M J 0 0 G L 0 7 0 0 O
0 0 4 0 0 0 H N 0 0 0 0 0 0 L 0 0 1 D 0 8 0 3 5 B
0 H 0 0 M 0 0 2 G 0 0 7 0 0 O 8 I 0 5 0 E 0 4 C P
0 0 0 G 0 A 0 0 D 0 8 I 0 0 0 0 0 4 C 0 0 H N K M
0 7 1 D O 8 0 3 5 B E 0 0 C 0 F H N 0 M 0 0 2 0 L
I 0 5 B 0 0 0 C P F H 0 K M J 0 0 0 0 A 0 0 D O 0
0 4 0 0 F H 0 K M J 9 0 G 0 A 0 0 0 O 8 0 3 5 B E
0 0 K M J 0 0 0 0 A 0 1 D 0 8 0 3 5 B 0 0 4 0 0 0
0 2 0 L A 7 1 D O 0 I 3 0 B 0 0 4 0 0 0 0 N K 0 0
7 1 D 0 8 I 0 0 0 0 0 4 0 P F 0 0 K 0 0 9 2 G L 0
3 5 0 0 0 4 C P F H 0 0 0 0 0 2 G 0 A 0 1 D O 0 I
4 0 P F 0 N 0 M 0 9 0 G L 0 0 1 D 0 8 0 0 5 0 0 6
N K M 0 0 0 0 L 0 7 1 D O 8 I 3 5 B E 0 4 C 0 0 0
0 G L A 7 1 0 0 8 0 3 0 B 0 0 4 0 P F 0 0 K 0 0 9
0 0 O 8 0 3 0 B 0 6 4 C P F 0 0 K M 0 0 0 0 L A 7
5 B E 6 4 0 P 0 H 0 K M 0 0 2 0 L 0 7 0 D O 0 0 0
C 0 F 0 N 0 M J 9 2 0 0 0 7 1 0 0 8 0 3 5 B E 0 4
0 M J 9 2 G L 0 7 1 D 0 0 0 3 0 0 E 6 0 0 P 0 H 0
0 0 A 7 1 0 O 0 I 3 0 0 0 6 4 0 P F H N 0 0 J 9 0
D 0 8 0 0 5 B 0 6 4 0 P 0 H N K M 0 9 2 G L A 0 0
";

/// A batch file with one puzzle of each kind.
pub const BATCH: &str = "\
4

4 0
0 4 0 1
1 3 0 0
0 0 1 0
3 0 4 0

9 0
5 3 0 0 7 0 0 0 0
6 0 0 1 9 5 0 0 0
0 9 8 0 0 0 0 6 0
8 0 0 0 6 0 0 0 3
4 0 0 8 0 3 0 0 1
7 0 0 0 2 0 0 0 6
0 6 0 0 0 0 2 8 0
0 0 0 4 1 9 0 0 5
0 0 0 0 8 0 0 7 9

9 1
3 0 9 0 0 4 0 0 0
0 0 0 7 0 0 3 0 0
2 0 0 0 0 8 0 0 9
5 0 0 0 0 0 1 7 0
0 0 8 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 3 0 0 0 0 2 0
1 0 0 0 0 0 0 0 0
0 0 0 9 0 0 0 5 7

4 1
1 0 0 0
0 0 0 0
0 0 1 0
0 0 0 0
";

fn sample(size: usize, variant: Variant, rows: &str) -> Puzzle {
    let rows: Vec<&str> = rows.lines().collect();
    Puzzle::parse(size, variant, &rows, &Alphabet::standard())
        .unwrap_or_else(|e| panic!("bundled {size}x{size} sample is invalid: {e}"))
}

#[must_use]
pub fn four() -> Puzzle {
    sample(4, Variant::Standard, FOUR)
}

#[must_use]
pub fn nine() -> Puzzle {
    sample(9, Variant::Standard, NINE)
}

#[must_use]
pub fn nine_diagonal() -> Puzzle {
    sample(9, Variant::Diagonal, NINE_DIAGONAL)
}

#[must_use]
pub fn sixteen() -> Puzzle {
    sample(16, Variant::Standard, SIXTEEN)
}

#[must_use]
pub fn twenty_five() -> Puzzle {
    sample(25, Variant::Standard, TWENTY_FIVE)
}
