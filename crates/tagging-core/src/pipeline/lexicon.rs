//! Closed-class word lists and irregular forms for the rule pipeline

pub const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "which", "what", "whatever",
];

pub const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

pub const PERSONAL_PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
    "mine", "yours", "hers", "ours", "theirs",
];

pub const WH_PRONOUNS: &[&str] = &["who", "whom", "whose", "whoever"];

pub const INDEFINITE_PRONOUNS: &[&str] = &[
    "someone", "somebody", "something", "anyone", "anybody", "anything", "everyone",
    "everybody", "everything", "nobody", "nothing", "none",
];

/// Pronouns that take third-person singular verbs
pub const THIRD_PERSON_SUBJECTS: &[&str] = &["he", "she", "it", "that", "this", "what", "who"];

/// Pronouns that take plain present-tense verbs
pub const NON_THIRD_PERSON_SUBJECTS: &[&str] = &["i", "you", "we", "they"];

pub const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "of", "off",
    "over", "under", "without", "within", "across", "behind", "beyond", "near", "since",
    "until", "upon", "among", "around", "toward", "towards", "like", "per", "via", "onto",
];

pub const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

pub const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "if", "unless", "while", "whereas", "whether", "once",
];

pub const BE_FORMS: &[(&str, &str)] = &[
    ("be", "VB"),
    ("am", "VBP"),
    ("are", "VBP"),
    ("is", "VBZ"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("been", "VBN"),
    ("being", "VBG"),
];

pub const HAVE_FORMS: &[(&str, &str)] = &[
    ("have", "VBP"),
    ("has", "VBZ"),
    ("had", "VBD"),
    ("having", "VBG"),
];

pub const DO_FORMS: &[(&str, &str)] = &[
    ("do", "VBP"),
    ("does", "VBZ"),
    ("did", "VBD"),
    ("done", "VBN"),
    ("doing", "VBG"),
];

pub const MODALS: &[&str] = &[
    "can", "could", "will", "would", "shall", "should", "may", "might", "must", "ca", "wo",
    "sha",
];

pub const INTERJECTIONS: &[&str] = &[
    "oh", "wow", "hello", "hi", "hey", "yes", "ouch", "oops", "thanks", "alas", "hmm", "ah",
    "okay", "ok",
];

pub const ADVERBS: &[&str] = &[
    "very", "really", "quite", "too", "also", "just", "only", "even", "still", "already",
    "always", "never", "often", "sometimes", "usually", "here", "there", "now", "then",
    "soon", "later", "again", "ever", "almost", "perhaps", "maybe", "rather", "instead",
    "however", "therefore", "thus", "so", "well", "away", "back", "far", "together",
    "once", "twice", "where", "when", "why", "how", "ago", "yet", "else", "anyway",
];

pub const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand",
    "million", "billion",
];

pub const ADJECTIVES: &[&str] = &[
    "good", "great", "excellent", "wonderful", "amazing", "beautiful", "perfect", "nice",
    "fine", "bad", "poor", "terrible", "awful", "horrible", "ugly", "wrong", "happy", "sad",
    "angry", "anxious", "worried", "upset", "depressed", "delighted", "pleased", "excited",
    "big", "small", "large", "little", "long", "short", "high", "low", "new", "old",
    "young", "early", "late", "important", "different", "same", "able", "free", "full",
    "real", "sure", "true", "clear", "easy", "hard", "strong", "weak", "hot", "cold", "warm",
    "cool", "dark", "bright", "red", "blue", "green", "black", "white", "rich", "simple",
    "whole", "public", "private", "certain", "possible", "quick", "slow", "fast", "safe",
    "busy", "calm", "kind", "proud", "tired", "afraid", "glad", "sorry", "lovely", "friendly",
];

pub const VERBS: &[&str] = &[
    "say", "get", "make", "go", "know", "take", "see", "come", "think", "look", "want",
    "give", "use", "find", "tell", "ask", "work", "seem", "feel", "try", "leave", "call",
    "need", "become", "put", "mean", "keep", "let", "begin", "help", "talk", "turn", "start",
    "show", "hear", "play", "run", "move", "like", "live", "believe", "hold", "bring",
    "happen", "write", "provide", "sit", "stand", "lose", "pay", "meet", "include",
    "continue", "learn", "change", "lead", "understand", "watch", "follow", "stop",
    "create", "speak", "read", "allow", "add", "spend", "grow", "walk", "win", "offer",
    "remember", "love", "consider", "appear", "buy", "wait", "serve", "die", "send",
    "expect", "build", "stay", "fall", "cut", "reach", "kill", "remain", "suggest", "raise",
    "pass", "sell", "require", "report", "decide", "pull", "travel", "arrive", "enter",
    "exit", "communicate", "discuss", "mention", "answer", "realize", "forget", "eat",
    "drink", "sleep", "hate", "fear", "smile", "laugh", "cry", "jump", "dance", "sing",
    "study", "carry", "visit", "open", "close", "explain", "agree", "plan", "hope",
];

/// Irregular verb forms: (form, lemma, fine tag)
pub const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("went", "go", "VBD"),
    ("gone", "go", "VBN"),
    ("came", "come", "VBD"),
    ("ran", "run", "VBD"),
    ("said", "say", "VBD"),
    ("told", "tell", "VBD"),
    ("spoke", "speak", "VBD"),
    ("spoken", "speak", "VBN"),
    ("thought", "think", "VBD"),
    ("knew", "know", "VBD"),
    ("known", "know", "VBN"),
    ("left", "leave", "VBD"),
    ("made", "make", "VBD"),
    ("took", "take", "VBD"),
    ("taken", "take", "VBN"),
    ("saw", "see", "VBD"),
    ("seen", "see", "VBN"),
    ("got", "get", "VBD"),
    ("gotten", "get", "VBN"),
    ("gave", "give", "VBD"),
    ("given", "give", "VBN"),
    ("found", "find", "VBD"),
    ("felt", "feel", "VBD"),
    ("became", "become", "VBD"),
    ("began", "begin", "VBD"),
    ("begun", "begin", "VBN"),
    ("brought", "bring", "VBD"),
    ("bought", "buy", "VBD"),
    ("wrote", "write", "VBD"),
    ("written", "write", "VBN"),
    ("understood", "understand", "VBD"),
    ("forgot", "forget", "VBD"),
    ("forgotten", "forget", "VBN"),
    ("meant", "mean", "VBD"),
    ("kept", "keep", "VBD"),
    ("held", "hold", "VBD"),
    ("stood", "stand", "VBD"),
    ("sat", "sit", "VBD"),
    ("lost", "lose", "VBD"),
    ("paid", "pay", "VBD"),
    ("met", "meet", "VBD"),
    ("led", "lead", "VBD"),
    ("heard", "hear", "VBD"),
    ("grew", "grow", "VBD"),
    ("grown", "grow", "VBN"),
    ("fell", "fall", "VBD"),
    ("fallen", "fall", "VBN"),
    ("sent", "send", "VBD"),
    ("built", "build", "VBD"),
    ("spent", "spend", "VBD"),
    ("won", "win", "VBD"),
    ("ate", "eat", "VBD"),
    ("eaten", "eat", "VBN"),
    ("drank", "drink", "VBD"),
    ("slept", "sleep", "VBD"),
    ("sang", "sing", "VBD"),
    ("sung", "sing", "VBN"),
];

/// Irregular comparatives: (form, lemma, fine tag)
pub const IRREGULAR_ADJECTIVES: &[(&str, &str, &str)] = &[
    ("better", "good", "JJR"),
    ("best", "good", "JJS"),
    ("worse", "bad", "JJR"),
    ("worst", "bad", "JJS"),
    ("more", "more", "JJR"),
    ("most", "most", "JJS"),
    ("less", "less", "JJR"),
    ("least", "least", "JJS"),
];

/// Irregular plurals: (form, lemma)
pub const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
];

/// Lemmas of contracted forms
pub const CLITIC_LEMMAS: &[(&str, &str)] = &[
    ("n't", "not"),
    ("'m", "be"),
    ("'re", "be"),
    ("'ve", "have"),
    ("'ll", "will"),
    ("'d", "would"),
    ("ca", "can"),
    ("wo", "will"),
    ("sha", "shall"),
];

/// Object and reflexive pronouns reduced to their subject form
pub const PRONOUN_LEMMAS: &[(&str, &str)] = &[
    ("i", "I"),
    ("me", "I"),
    ("myself", "I"),
    ("him", "he"),
    ("himself", "he"),
    ("us", "we"),
    ("ourselves", "we"),
    ("them", "they"),
    ("themselves", "they"),
];

pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "also", "although",
    "always", "am", "among", "an", "and", "another", "any", "anyone", "anything", "are",
    "around", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "ca", "can", "could", "did", "do", "does", "doing", "done", "down",
    "during", "each", "either", "else", "even", "ever", "every", "everyone", "everything",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "least", "less", "many", "may", "me", "might",
    "more", "most", "much", "must", "my", "myself", "neither", "never", "no", "nobody",
    "none", "nor", "not", "nothing", "now", "n't", "of", "off", "often", "on", "once",
    "one", "only", "or", "other", "others", "our", "ours", "ourselves", "out", "over",
    "own", "per", "perhaps", "quite", "rather", "really", "same", "say", "see", "seem",
    "several", "shall", "she", "should", "since", "so", "some", "someone", "something",
    "still", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "therefore", "these", "they", "this", "those", "though", "through",
    "thus", "to", "too", "toward", "towards", "under", "unless", "until", "up", "upon",
    "us", "used", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "where", "whereas", "whether", "which", "while", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves", "'d", "'ll", "'m", "'re", "'s", "'ve",
];

pub fn lookup_pair(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn lookup_triple(
    table: &[(&'static str, &'static str, &'static str)],
    key: &str,
) -> Option<(&'static str, &'static str)> {
    table
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, lemma, tag)| (*lemma, *tag))
}
