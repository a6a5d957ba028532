//! Распределение весов KRA внутри шаблона
//!
//! Выбранные KRA должны в сумме давать ровно 100%. Вес можно задать вручную
//! (значение не ограничивается, границы держит только поле ввода) или
//! распределить поровну через [`auto_balance`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Сумма весов сбалансированного шаблона
pub const FULL_WEIGHT: i32 = 100;

/// Вес каждого выбранного элемента по его идентификатору
pub type WeightMap = HashMap<String, i32>;

/// Добавить элемент в выборку или убрать его оттуда.
///
/// Повторное добавление всегда берёт `default_weight`: ручной вес,
/// заданный до удаления, не сохраняется.
pub fn toggle(
    selection: &mut Vec<String>,
    weights: &mut WeightMap,
    item_id: &str,
    default_weight: i32,
) {
    if let Some(pos) = selection.iter().position(|id| id == item_id) {
        selection.remove(pos);
        weights.remove(item_id);
    } else {
        selection.push(item_id.to_string());
        weights.insert(item_id.to_string(), default_weight);
    }
}

/// Перезаписать вес выбранного элемента. Для невыбранного: ничего не делает.
pub fn set_weight(selection: &[String], weights: &mut WeightMap, item_id: &str, weight: i32) {
    if selection.iter().any(|id| id == item_id) {
        weights.insert(item_id.to_string(), weight);
    }
}

/// Сумма весов по выборке; отсутствующий вес считается нулём
pub fn total_weight(selection: &[String], weights: &WeightMap) -> i64 {
    selection
        .iter()
        .map(|id| weights.get(id).copied().unwrap_or(0) as i64)
        .sum()
}

/// Пустая выборка никогда не сбалансирована
pub fn is_balanced(selection: &[String], weights: &WeightMap) -> bool {
    !selection.is_empty() && total_weight(selection, weights) == FULL_WEIGHT as i64
}

/// Равномерно распределить 100% по выборке.
///
/// Остаток от деления достаётся первым элементам в порядке выбора:
/// для трёх элементов получается `[34, 33, 33]`.
pub fn auto_balance(selection: &[String]) -> WeightMap {
    let n = selection.len() as i32;
    if n == 0 {
        return WeightMap::new();
    }
    let base = FULL_WEIGHT / n;
    let remainder = (FULL_WEIGHT % n) as usize;

    selection
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let extra = if i < remainder { 1 } else { 0 };
            (id.clone(), base + extra)
        })
        .collect()
}

/// Состояние конструктора шаблона: выбранные KRA и их веса.
///
/// Ключи `weights` всегда совпадают с `selection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightAllocation {
    selection: Vec<String>,
    weights: WeightMap,
}

impl WeightAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, item_id: &str, default_weight: i32) {
        toggle(&mut self.selection, &mut self.weights, item_id, default_weight);
    }

    pub fn set_weight(&mut self, item_id: &str, weight: i32) {
        set_weight(&self.selection, &mut self.weights, item_id, weight);
    }

    pub fn total_weight(&self) -> i64 {
        total_weight(&self.selection, &self.weights)
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(&self.selection, &self.weights)
    }

    /// Сколько процентов осталось распределить (отрицательное: перебор)
    pub fn remaining(&self) -> i64 {
        FULL_WEIGHT as i64 - self.total_weight()
    }

    /// На пустой выборке ничего не меняет
    pub fn auto_balance(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.weights = auto_balance(&self.selection);
    }

    /// Сброс после сохранения или отмены
    pub fn reset(&mut self) {
        self.selection.clear();
        self.weights.clear();
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selection.iter().any(|id| id == item_id)
    }

    pub fn weight_of(&self, item_id: &str) -> Option<i32> {
        self.weights.get(item_id).copied()
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// Пары (id, вес) в порядке выбора
    pub fn items(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.selection
            .iter()
            .map(|id| (id.as_str(), self.weights.get(id).copied().unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_auto_balance_three_items() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 10);
        alloc.toggle("kra-002", 10);
        alloc.toggle("kra-003", 10);
        alloc.auto_balance();

        assert_eq!(alloc.weight_of("kra-001"), Some(34));
        assert_eq!(alloc.weight_of("kra-002"), Some(33));
        assert_eq!(alloc.weight_of("kra-003"), Some(33));
        assert_eq!(alloc.total_weight(), 100);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn test_auto_balance_seven_items() {
        let selection = ids(&["a", "b", "c", "d", "e", "f", "g"]);
        let weights = auto_balance(&selection);
        let ordered: Vec<i32> = selection.iter().map(|id| weights[id]).collect();
        assert_eq!(ordered, vec![15, 15, 14, 14, 14, 14, 14]);
    }

    #[test]
    fn test_auto_balance_always_sums_to_100() {
        for n in 1..=150 {
            let selection: Vec<String> = (0..n).map(|i| format!("kra-{i:03}")).collect();
            let weights = auto_balance(&selection);
            assert_eq!(weights.len(), n);
            assert_eq!(total_weight(&selection, &weights), 100, "n = {n}");
            let max = weights.values().max().copied().unwrap_or(0);
            let min = weights.values().min().copied().unwrap_or(0);
            assert!(max - min <= 1);
        }
    }

    #[test]
    fn test_auto_balance_ignores_previous_weights() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 70);
        alloc.toggle("kra-002", 5);
        alloc.toggle("kra-003", 1);
        alloc.auto_balance();
        let first = alloc.clone();
        alloc.set_weight("kra-002", 90);
        alloc.auto_balance();
        assert_eq!(alloc, first);
    }

    #[test]
    fn test_auto_balance_empty_is_noop() {
        let mut alloc = WeightAllocation::new();
        alloc.auto_balance();
        assert!(alloc.is_empty());
        assert!(alloc.weights().is_empty());
        assert!(auto_balance(&[]).is_empty());
    }

    #[test]
    fn test_empty_selection_is_not_balanced() {
        assert!(!is_balanced(&[], &WeightMap::new()));
        assert!(!WeightAllocation::new().is_balanced());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-004", 25);
        assert_eq!(alloc.selection(), &["kra-004".to_string()]);
        assert_eq!(alloc.weight_of("kra-004"), Some(25));

        alloc.toggle("kra-004", 25);
        assert!(alloc.is_empty());
        assert!(alloc.weights().is_empty());
    }

    #[test]
    fn test_readd_uses_default_weight_again() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 20);
        alloc.set_weight("kra-001", 55);
        alloc.toggle("kra-001", 20);
        alloc.toggle("kra-001", 20);
        assert_eq!(alloc.weight_of("kra-001"), Some(20));
    }

    #[test]
    fn test_toggle_keeps_keys_in_sync() {
        let mut alloc = WeightAllocation::new();
        let sequence = ["a", "b", "a", "c", "d", "b", "e", "c", "a"];
        for id in sequence {
            alloc.toggle(id, 10);
            assert_eq!(alloc.weights().len(), alloc.len());
            for selected in alloc.selection() {
                assert!(alloc.weights().contains_key(selected));
            }
        }
        assert_eq!(alloc.selection(), &ids(&["d", "e", "a"])[..]);
    }

    #[test]
    fn test_removal_drops_weight_without_redistribution() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 50);
        alloc.toggle("kra-002", 50);
        assert!(alloc.is_balanced());
        alloc.toggle("kra-001", 50);
        assert_eq!(alloc.weight_of("kra-002"), Some(50));
        assert_eq!(alloc.total_weight(), 50);
        assert_eq!(alloc.remaining(), 50);
        assert!(!alloc.is_balanced());
    }

    #[test]
    fn test_set_weight_on_unselected_is_noop() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 40);
        let before = alloc.clone();
        alloc.set_weight("kra-999", 60);
        assert_eq!(alloc, before);
        assert_eq!(alloc.weight_of("kra-999"), None);
    }

    #[test]
    fn test_set_weight_is_not_clamped() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 40);
        alloc.toggle("kra-002", 40);
        alloc.set_weight("kra-001", 150);
        alloc.set_weight("kra-002", -50);
        assert_eq!(alloc.weight_of("kra-001"), Some(150));
        assert_eq!(alloc.weight_of("kra-002"), Some(-50));
        assert!(alloc.is_balanced());
        assert_eq!(alloc.remaining(), 0);
    }

    #[test]
    fn test_total_weight_treats_missing_as_zero() {
        let selection = ids(&["a", "b"]);
        let mut weights = WeightMap::new();
        weights.insert("a".into(), 30);
        weights.insert("orphan".into(), 70);
        assert_eq!(total_weight(&selection, &weights), 30);
    }

    #[test]
    fn test_items_follow_selection_order() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("z", 10);
        alloc.toggle("a", 20);
        alloc.toggle("m", 70);
        let items: Vec<(&str, i32)> = alloc.items().collect();
        assert_eq!(items, vec![("z", 10), ("a", 20), ("m", 70)]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("a", 100);
        alloc.reset();
        assert!(alloc.is_empty());
        assert!(alloc.weights().is_empty());
    }

    #[test]
    fn test_free_functions_match_methods() {
        let mut selection = Vec::new();
        let mut weights = WeightMap::new();
        toggle(&mut selection, &mut weights, "kra-001", 60);
        toggle(&mut selection, &mut weights, "kra-002", 30);
        set_weight(&selection, &mut weights, "kra-002", 40);
        assert!(is_balanced(&selection, &weights));
        toggle(&mut selection, &mut weights, "kra-001", 60);
        assert_eq!(selection, ids(&["kra-002"]));
        assert_eq!(weights.len(), 1);
    }
}
