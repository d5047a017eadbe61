use borsh::{BorshDeserialize, BorshSerialize};

use super::LookupMap;

impl<K, V> Drop for LookupMap<K, V>
where
    K: BorshSerialize + Ord,
    V: BorshSerialize + BorshDeserialize,
{
    fn drop(&mut self) {
        self.flush()
    }
}

impl<K, V> BorshSerialize for LookupMap<K, V>
where
    K: BorshSerialize + Ord,
    V: BorshSerialize + BorshDeserialize,
{
    fn serialize<W: borsh::maybestd::io::Write>(
        &self,
        writer: &mut W,
    ) -> Result<(), borsh::maybestd::io::Error> {
        BorshSerialize::serialize(self.prefix(), writer)
    }
}

impl<K, V> BorshDeserialize for LookupMap<K, V>
where
    K: BorshSerialize + Ord,
    V: BorshSerialize + BorshDeserialize,
{
    fn deserialize(buf: &mut &[u8]) -> Result<Self, borsh::maybestd::io::Error> {
        let prefix: Vec<u8> = BorshDeserialize::deserialize(buf)?;
        Ok(Self::new(prefix))
    }
}
