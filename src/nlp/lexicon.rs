use super::Pos;

pub(crate) fn closed_class(word: &str) -> Option<Pos> {
    let pos = match word {
        "the" | "a" | "an" | "this" | "that" | "these" | "those" | "some" | "any" | "every"
        | "each" | "no" | "all" | "both" | "either" | "neither" | "his" | "her" | "their"
        | "its" | "my" | "your" | "our" | "another" | "such" => Pos::Det,
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "him" | "them" | "me" | "us"
        | "who" | "whom" | "what" | "which" | "whose" | "someone" | "everyone" | "nobody"
        | "something" | "nothing" | "everything" | "himself" | "herself" | "themselves"
        | "itself" | "yourself" | "ourselves" | "myself" | "hers" | "theirs" | "mine" | "yours" => {
            Pos::Pron
        }
        "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between" | "into"
        | "through" | "during" | "before" | "after" | "above" | "below" | "from" | "up"
        | "down" | "of" | "off" | "over" | "under" | "near" | "across" | "since" | "without"
        | "within" | "among" | "toward" | "towards" | "upon" | "via" | "per" | "despite" => Pos::Adp,
        "to" | "not" | "n't" => Pos::Part,
        "and" | "or" | "but" | "nor" | "so" | "yet" | "because" | "although" | "though" | "if"
        | "unless" | "while" | "whereas" | "whether" | "than" => Pos::Conj,
        "is" | "are" | "was" | "were" | "be" | "been" | "being" | "am" | "has" | "have" | "had"
        | "having" | "do" | "does" | "did" | "will" | "would" | "shall" | "should" | "can"
        | "could" | "may" | "might" | "must" | "won't" | "can't" | "don't" | "doesn't"
        | "didn't" | "isn't" | "aren't" | "wasn't" | "weren't" | "wouldn't" | "shouldn't"
        | "couldn't" | "hasn't" | "haven't" | "hadn't" | "it's" | "that's" | "there's" => Pos::Aux,
        "very" | "also" | "just" | "only" | "even" | "still" | "already" | "never" | "always"
        | "often" | "here" | "there" | "now" | "then" | "today" | "yesterday" | "tomorrow"
        | "again" | "too" | "soon" | "ever" | "almost" | "quite" | "really" | "when" | "where"
        | "why" | "how" => Pos::Adv,
        _ => return None,
    };
    Some(pos)
}

const COMMON_VERBS: &[&str] = &[
    "say", "says", "said", "believe", "believes", "believed", "know", "knows", "knew", "make",
    "makes", "made", "go", "goes", "went", "get", "gets", "got", "see", "sees", "saw", "come",
    "comes", "came", "take", "takes", "took", "give", "gives", "gave", "find", "finds", "found",
    "think", "thinks", "thought", "tell", "tells", "told", "become", "becomes", "became", "show",
    "shows", "showed", "leave", "leaves", "left", "feel", "feels", "felt", "bring", "brings",
    "brought", "begin", "begins", "began", "keep", "keeps", "kept", "hold", "holds", "held",
    "write", "writes", "wrote", "stand", "stands", "stood", "hear", "hears", "heard", "let",
    "lets", "mean", "means", "meant", "set", "sets", "meet", "meets", "met", "run", "runs", "ran",
    "pay", "pays", "paid", "sit", "sits", "sat", "speak", "speaks", "spoke", "lie", "lies", "lead",
    "leads", "led", "grow", "grows", "grew", "lose", "loses", "lost", "fall", "falls", "fell",
    "send", "sends", "sent", "build", "builds", "built", "win", "wins", "won", "buy", "buys",
    "bought", "sell", "sells", "sold", "rise", "rises", "rose", "want", "wants", "need", "needs",
    "use", "uses", "work", "works", "call", "calls", "try", "tries", "ask", "asks", "seem",
    "seems", "help", "helps", "play", "plays", "move", "moves", "live", "lives", "happen",
    "happens", "include", "includes", "continue", "continues", "change", "changes", "announce",
    "announces", "report", "reports", "claim", "claims", "confirm", "confirms", "deny", "denies",
    "visit", "visits", "born", "die", "dies", "kill", "kills", "warn", "warns", "cure", "cures",
];

pub(crate) fn is_common_verb(word: &str) -> bool {
    COMMON_VERBS.contains(&word)
}

pub(crate) fn suffix_pos(word: &str) -> Option<Pos> {
    let len = word.chars().count();
    if len > 4 && word.ends_with("ly") {
        return Some(Pos::Adv);
    }
    if (len > 4 && word.ends_with("ing")) || (len > 3 && word.ends_with("ed")) {
        return Some(Pos::Verb);
    }
    const ADJ: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];
    if len > 4 && ADJ.iter().any(|s| word.ends_with(s)) {
        return Some(Pos::Adj);
    }
    const NOUN: &[&str] = &[
        "tion", "sion", "ment", "ness", "ity", "ism", "ist", "ship", "ance", "ence", "er", "or",
    ];
    if len > 3 && NOUN.iter().any(|s| word.ends_with(s)) {
        return Some(Pos::Noun);
    }
    None
}

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "president", "senator", "sen", "governor", "gov", "minister",
    "chancellor", "king", "queen", "prince", "princess", "pope", "judge", "rep", "representative",
    "secretary", "mayor", "general", "gen", "sir", "lady", "lord", "ceo", "premier", "sheikh",
];

pub(crate) fn is_title(word: &str) -> bool {
    let w = word.trim_end_matches('.').to_lowercase();
    TITLES.contains(&w.as_str())
}

const ORG_WORDS: &[&str] = &[
    "inc", "corp", "corporation", "company", "co", "ltd", "llc", "news", "times", "post", "press",
    "university", "college", "party", "group", "agency", "department", "ministry", "bank",
    "institute", "association", "council", "committee", "foundation", "network", "media",
    "reserve", "commission", "board", "fund", "court", "congress", "senate", "parliament",
    "journal", "nature", "science", "lancet",
];

pub(crate) fn is_org_word(word: &str) -> bool {
    let w = word.trim_end_matches('.').to_lowercase();
    ORG_WORDS.contains(&w.as_str())
}

pub(crate) fn is_locative_prep(word: &str) -> bool {
    matches!(word, "in" | "at" | "from" | "near" | "across")
}

const PLACES: &[&str] = &[
    // continents and regions
    "africa", "asia", "europe", "north america", "south america", "antarctica", "oceania",
    "middle east", "latin america", "scandinavia", "siberia", "balkans", "caribbean",
    // countries
    "afghanistan", "albania", "algeria", "argentina", "armenia", "australia", "austria",
    "bangladesh", "belarus", "belgium", "bolivia", "bosnia", "brazil", "bulgaria", "cambodia",
    "cameroon", "canada", "chile", "china", "colombia", "congo", "croatia", "cuba", "cyprus",
    "czech republic", "denmark", "ecuador", "egypt", "estonia", "ethiopia", "finland", "france",
    "georgia", "germany", "ghana", "greece", "guatemala", "haiti", "honduras", "hungary",
    "iceland", "india", "indonesia", "iran", "iraq", "ireland", "israel", "italy", "jamaica",
    "japan", "jordan", "kazakhstan", "kenya", "korea", "north korea", "south korea", "kosovo",
    "kuwait", "latvia", "lebanon", "libya", "lithuania", "luxembourg", "madagascar", "malaysia",
    "mali", "mexico", "moldova", "mongolia", "morocco", "mozambique", "myanmar", "nepal",
    "netherlands", "new zealand", "nicaragua", "niger", "nigeria", "norway", "pakistan",
    "palestine", "panama", "paraguay", "peru", "philippines", "poland", "portugal", "qatar",
    "romania", "russia", "rwanda", "saudi arabia", "senegal", "serbia", "singapore", "slovakia",
    "slovenia", "somalia", "south africa", "spain", "sri lanka", "sudan", "sweden",
    "switzerland", "syria", "taiwan", "tanzania", "thailand", "tunisia", "turkey", "uganda",
    "ukraine", "united arab emirates", "united kingdom", "united states", "america", "britain",
    "great britain", "england", "scotland", "wales", "uruguay", "uzbekistan", "venezuela",
    "vietnam", "yemen", "zambia", "zimbabwe", "usa", "uk",
    // us states
    "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut",
    "delaware", "florida", "hawaii", "idaho", "illinois", "indiana", "iowa", "kansas",
    "kentucky", "louisiana", "maine", "maryland", "massachusetts", "michigan", "minnesota",
    "mississippi", "missouri", "montana", "nebraska", "nevada", "new hampshire", "new jersey",
    "new mexico", "new york", "north carolina", "north dakota", "ohio", "oklahoma", "oregon",
    "pennsylvania", "rhode island", "south carolina", "south dakota", "tennessee", "texas",
    "utah", "vermont", "virginia", "washington", "west virginia", "wisconsin", "wyoming",
    // cities
    "london", "paris", "berlin", "madrid", "rome", "moscow", "beijing", "shanghai", "tokyo",
    "delhi", "new delhi", "mumbai", "karachi", "lagos", "cairo", "nairobi", "johannesburg",
    "sydney", "melbourne", "toronto", "vancouver", "montreal", "chicago", "los angeles",
    "san francisco", "boston", "seattle", "miami", "houston", "dallas", "atlanta", "honolulu",
    "washington d.c.", "brussels", "vienna", "warsaw", "kyiv", "kiev", "istanbul", "ankara",
    "tehran", "baghdad", "jerusalem", "tel aviv", "dubai", "riyadh", "seoul", "pyongyang",
    "hong kong", "bangkok", "jakarta", "manila", "hanoi", "singapore", "mexico city",
    "buenos aires", "rio de janeiro", "sao paulo", "lima", "bogota", "caracas", "havana",
    "stockholm", "oslo", "copenhagen", "helsinki", "dublin", "edinburgh", "amsterdam",
    "lisbon", "athens", "prague", "budapest", "geneva", "zurich", "munich", "milan", "naples",
    "barcelona", "kabul", "islamabad", "dhaka", "wuhan", "gaza", "kinshasa", "addis ababa",
];

pub(crate) fn is_place(name: &str) -> bool {
    let lower = name.to_lowercase();
    PLACES.contains(&lower.as_str())
}

/// Word polarity scores in [-1, 1].
pub(crate) fn polarity_of(word: &str) -> Option<f64> {
    let score = match word {
        "good" => 0.7,
        "great" => 0.8,
        "excellent" | "wonderful" | "amazing" | "fantastic" | "brilliant" => 0.9,
        "best" | "perfect" => 1.0,
        "better" => 0.5,
        "happy" | "glad" | "delighted" => 0.8,
        "love" | "loved" | "loves" => 0.5,
        "nice" | "pleasant" => 0.6,
        "success" | "successful" => 0.75,
        "win" | "wins" | "won" | "victory" => 0.6,
        "safe" | "secure" | "healthy" => 0.5,
        "hope" | "hopeful" | "optimistic" => 0.5,
        "benefit" | "beneficial" | "improve" | "improved" | "improvement" => 0.5,
        "positive" => 0.45,
        "strong" | "growth" | "progress" => 0.4,
        "celebrate" | "celebrated" | "praise" | "praised" => 0.6,
        "bad" => -0.7,
        "worse" => -0.6,
        "worst" | "terrible" | "horrible" | "awful" | "disastrous" => -1.0,
        "sad" | "tragic" | "tragedy" => -0.6,
        "hate" | "hated" | "hates" => -0.8,
        "angry" | "furious" | "outrage" | "outraged" => -0.7,
        "fail" | "failed" | "failure" => -0.5,
        "crisis" | "disaster" | "catastrophe" => -0.7,
        "dangerous" | "danger" | "deadly" | "threat" => -0.6,
        "kill" | "killed" | "killing" | "death" | "dead" | "dies" | "died" => -0.6,
        "corrupt" | "corruption" | "fraud" | "scam" | "lie" | "lies" | "liar" => -0.7,
        "attack" | "attacked" | "war" | "violence" | "violent" => -0.6,
        "fear" | "scared" | "afraid" | "panic" => -0.6,
        "negative" => -0.3,
        "weak" | "poor" | "loss" | "lost" => -0.4,
        "shocking" => -0.5,
        "wrong" => -0.5,
        _ => return None,
    };
    Some(score)
}

pub(crate) fn is_negation(word: &str) -> bool {
    matches!(
        word,
        "not" | "no" | "never" | "n't" | "isn't" | "wasn't" | "aren't" | "weren't" | "don't"
            | "doesn't" | "didn't" | "won't" | "can't" | "couldn't" | "wouldn't" | "shouldn't"
    )
}

pub(crate) fn is_intensifier(word: &str) -> bool {
    matches!(word, "very" | "extremely" | "really" | "incredibly" | "highly" | "so")
}
