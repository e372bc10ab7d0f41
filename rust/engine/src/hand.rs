use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

/// Hand categories from weakest to strongest; the discriminant is the
/// category rank (0 = High Card .. 9 = Royal Flush).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// A ranked five-card hand.
///
/// `cards` holds the five cards in comparison order: the combination first
/// (quads, trips, higher pair, ...) and kickers after it, each group from
/// high to low. A wheel is ordered 5-4-3-2-A.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub category: Category,
    pub cards: Vec<Card>,
    pub kickers: Vec<Card>,
}

impl EvaluatedHand {
    pub fn name(&self) -> &'static str {
        self.category.name()
    }
}

/// Ranks a set of five to seven cards directly, in descending strength
/// order of the categories.
pub fn evaluate_hand(cards: &[Card]) -> EvaluatedHand {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));

    // Straight flush / royal flush
    if let Some(flush) = flush_cards(&sorted) {
        if let Some(run) = find_straight(&flush) {
            let category = if run[0].rank == Rank::Ace {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return EvaluatedHand {
                category,
                cards: run,
                kickers: vec![],
            };
        }
    }

    let groups = rank_groups(&sorted);
    let top = groups.first().map(|g| g.len()).unwrap_or(0);
    let second = groups.get(1).map(|g| g.len()).unwrap_or(0);

    if top == 4 {
        let quad = groups[0].clone();
        return with_kickers(Category::FourOfAKind, quad, &sorted, 1);
    }

    if top == 3 && second >= 2 {
        let mut cards = groups[0].clone();
        cards.extend(groups[1].iter().take(2).copied());
        return EvaluatedHand {
            category: Category::FullHouse,
            cards,
            kickers: vec![],
        };
    }

    if let Some(flush) = flush_cards(&sorted) {
        return EvaluatedHand {
            category: Category::Flush,
            cards: flush.into_iter().take(5).collect(),
            kickers: vec![],
        };
    }

    if let Some(run) = find_straight(&sorted) {
        return EvaluatedHand {
            category: Category::Straight,
            cards: run,
            kickers: vec![],
        };
    }

    if top == 3 {
        let trips = groups[0].clone();
        return with_kickers(Category::ThreeOfAKind, trips, &sorted, 2);
    }

    if top == 2 && second == 2 {
        let mut pairs = groups[0].clone();
        pairs.extend(groups[1].iter().copied());
        return with_kickers(Category::TwoPair, pairs, &sorted, 1);
    }

    if top == 2 {
        let pair = groups[0].clone();
        return with_kickers(Category::OnePair, pair, &sorted, 3);
    }

    let cards: Vec<Card> = sorted.iter().take(5).copied().collect();
    EvaluatedHand {
        category: Category::HighCard,
        kickers: cards.iter().skip(1).copied().collect(),
        cards,
    }
}

/// Best five-card hand out of up to seven cards: every five-card
/// combination is ranked on its own and the strongest one kept.
pub fn best_of_seven(cards: &[Card]) -> EvaluatedHand {
    if cards.len() <= 5 {
        return evaluate_hand(cards);
    }
    let mut best: Option<EvaluatedHand> = None;
    for combo in five_card_combinations(cards) {
        let hand = evaluate_hand(&combo);
        best = match best {
            Some(current) if compare_hands(&current, &hand) != Ordering::Less => Some(current),
            _ => Some(hand),
        };
    }
    best.unwrap_or_else(|| evaluate_hand(cards))
}

/// Orders hands by category, then by their constituent cards pairwise from
/// the top. `Greater` means `a` beats `b`; `Equal` is a chop.
pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a
            .cards
            .iter()
            .zip(b.cards.iter())
            .map(|(x, y)| x.rank.cmp(&y.rank))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

fn with_kickers(
    category: Category,
    mut made: Vec<Card>,
    sorted: &[Card],
    n: usize,
) -> EvaluatedHand {
    let kickers: Vec<Card> = sorted
        .iter()
        .filter(|c| !made.iter().any(|m| m.rank == c.rank))
        .take(n)
        .copied()
        .collect();
    made.extend(kickers.iter().copied());
    EvaluatedHand {
        category,
        cards: made,
        kickers,
    }
}

/// Cards of the suit holding five or more, high to low.
fn flush_cards(sorted: &[Card]) -> Option<Vec<Card>> {
    let mut by_suit: BTreeMap<Suit, Vec<Card>> = BTreeMap::new();
    for &c in sorted {
        by_suit.entry(c.suit).or_default().push(c);
    }
    by_suit.into_values().find(|cards| cards.len() >= 5)
}

/// Groups of equal rank, largest group first and higher rank first on ties.
fn rank_groups(sorted: &[Card]) -> Vec<Vec<Card>> {
    let mut by_rank: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
    for &c in sorted {
        by_rank.entry(c.rank).or_default().push(c);
    }
    let mut groups: Vec<Vec<Card>> = by_rank.into_values().collect();
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then(b[0].rank.cmp(&a[0].rank)));
    groups
}

/// Highest five-card run among the cards, one card per rank. The wheel
/// (A-2-3-4-5) only counts when no higher run exists.
fn find_straight(sorted: &[Card]) -> Option<Vec<Card>> {
    let mut unique: Vec<Card> = Vec::with_capacity(sorted.len());
    for &c in sorted {
        if !unique.iter().any(|u| u.rank == c.rank) {
            unique.push(c);
        }
    }
    unique.sort_by(|a, b| b.rank.cmp(&a.rank));

    for window in unique.windows(5) {
        if window[0].rank.value() - window[4].rank.value() == 4 {
            return Some(window.to_vec());
        }
    }

    let pick = |rank: Rank| unique.iter().find(|c| c.rank == rank).copied();
    let wheel = [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    wheel.iter().map(|&r| pick(r)).collect()
}

fn five_card_combinations(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut out = Vec::new();
    let mut idx = [0usize, 1, 2, 3, 4];
    loop {
        out.push(idx.map(|i| cards[i]));
        // advance to the next lexicographic index combination
        let mut i = 5;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if idx[i] < n - 5 + i {
                break;
            }
        }
        idx[i] += 1;
        for j in i + 1..5 {
            idx[j] = idx[j - 1] + 1;
        }
    }
}
