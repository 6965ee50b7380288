/// Пара параллельных срезов (ID, значения) одного чанка
pub type Chunk<'a, I, V> = (&'a [I], &'a [V]);

/// Разбить параллельные списки ID и значений на чанки не длиннее `limit`.
///
/// Оба списка режутся по одним и тем же границам, порядок сохраняется.
/// Все чанки, кроме последнего, имеют длину ровно `limit`.
///
/// `limit == 0` считается как 1, длины списков должны совпадать.
pub fn get_chunks<'a, I, V>(ids: &'a [I], values: &'a [V], limit: usize) -> Vec<Chunk<'a, I, V>> {
    debug_assert_eq!(ids.len(), values.len());
    let limit = limit.max(1);
    ids.chunks(limit).zip(values.chunks(limit)).collect()
}
